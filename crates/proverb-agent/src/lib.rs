//! # proverb-agent
//!
//! A conversational assistant that keeps a list of proverbs and can look up
//! places, weather and the web while talking about them.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  toolkit(): ToolRegistry<ProverbState>                   │
//! ├──────────────────────────────────────────────────────────┤
//! │  get_proverbs  add_proverbs  set_proverbs                │  → state
//! │  get_lat_lng   get_weather   search                      │  → providers
//! │  get_current_date                                        │  → clock
//! ├──────────────────────────────────────────────────────────┤
//! │  Providers: Mapbox | Tomorrow.io | Tavily  (or demo)     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! A fresh [`ProverbState`] is created for every run; the registry and the
//! provider clients are built once and shared.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod state;
pub mod svckit;

use agent_core::{tool::CurrentDateTool, ToolRegistry};

pub use config::{ApiKey, ProviderConfig};
pub use error::{ProverbError, Result};
pub use model::{GeoPoint, ProverbSnapshot, SearchOptions, SearchResult, WeatherReport};
pub use state::{ProverbState, Providers};

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{
        AddProverbsTool, GetLatLngTool, GetProverbsTool, GetWeatherTool, SearchTool,
        SetProverbsTool,
    };
}

/// Every tool the proverb agent can call
pub fn toolkit() -> ToolRegistry<ProverbState> {
    let mut registry = ToolRegistry::new();
    registry.register(tools::GetProverbsTool);
    registry.register(tools::AddProverbsTool);
    registry.register(tools::SetProverbsTool);
    registry.register(tools::GetLatLngTool);
    registry.register(tools::GetWeatherTool);
    registry.register(tools::SearchTool);
    registry.register(CurrentDateTool);
    registry
}

/// System prompt for the proverb agent
pub const PROVERB_AGENT_PROMPT: &str = r#"You are a helpful assistant that helps manage and discuss proverbs.

The user has a list of proverbs that you can help them manage.
You have tools available to add, set, or retrieve proverbs from the list.

When discussing proverbs, ALWAYS use the get_proverbs tool to see the current list before
mentioning, updating, or discussing proverbs with the user.

If you require today's date, use get_current_date.

If get_lat_lng cannot find a location, try again with a more specific or differently worded
description before giving up."#;
