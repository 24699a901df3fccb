//! Session State
//!
//! One `ProverbState` is built per request and owned by that request's
//! agent run. The provider set is picked once from configuration and shared
//! read-only between runs.

use std::sync::Arc;

use agent_core::{AgentEvent, Result};
use reqwest::Client;

use crate::config::ProviderConfig;
use crate::model::ProverbSnapshot;
use crate::provider::{
    DemoGeocoder, DemoSearch, DemoWeather, Geocoder, MapboxGeocoder, SearchService, TavilySearch,
    TomorrowWeather, WeatherService,
};

/// Live or fallback implementation for each provider-backed capability
#[derive(Clone)]
pub struct Providers {
    pub geocoder: Arc<dyn Geocoder>,
    pub weather: Arc<dyn WeatherService>,
    pub search: Arc<dyn SearchService>,
}

impl Providers {
    /// Live clients where a key is configured, fallbacks elsewhere
    pub fn from_config(config: &ProviderConfig, client: &Client) -> Self {
        let geocoder: Arc<dyn Geocoder> = match &config.geo_api_key {
            Some(key) => {
                Arc::new(MapboxGeocoder::new(client.clone(), key.clone(), &config.geo_base_url))
            }
            None => Arc::new(DemoGeocoder),
        };
        let weather: Arc<dyn WeatherService> = match &config.weather_api_key {
            Some(key) => Arc::new(TomorrowWeather::new(
                client.clone(),
                key.clone(),
                &config.weather_base_url,
            )),
            None => Arc::new(DemoWeather),
        };
        let search: Arc<dyn SearchService> = match &config.search_api_key {
            Some(key) => {
                Arc::new(TavilySearch::new(client.clone(), key.clone(), &config.search_base_url))
            }
            None => Arc::new(DemoSearch),
        };

        tracing::info!(
            geocoder = geocoder.name(),
            weather = weather.name(),
            search = search.name(),
            "Providers configured"
        );

        Self { geocoder, weather, search }
    }

    /// Fallbacks only
    pub fn demo() -> Self {
        Self {
            geocoder: Arc::new(DemoGeocoder),
            weather: Arc::new(DemoWeather),
            search: Arc::new(DemoSearch),
        }
    }
}

impl std::fmt::Debug for Providers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Providers")
            .field("geocoder", &self.geocoder.name())
            .field("weather", &self.weather.name())
            .field("search", &self.search.name())
            .finish()
    }
}

/// Per-request state handed to every tool call of one run
#[derive(Clone, Debug)]
pub struct ProverbState {
    proverbs: Vec<String>,
    providers: Providers,
}

impl ProverbState {
    pub fn new(providers: Providers) -> Self {
        Self {
            proverbs: Vec::new(),
            providers,
        }
    }

    /// Start from a list the client already holds
    pub fn with_proverbs(mut self, proverbs: Vec<String>) -> Self {
        self.proverbs = proverbs;
        self
    }

    pub fn proverbs(&self) -> &[String] {
        &self.proverbs
    }

    pub fn providers(&self) -> &Providers {
        &self.providers
    }

    pub fn snapshot(&self) -> ProverbSnapshot {
        ProverbSnapshot {
            proverbs: self.proverbs.clone(),
        }
    }

    pub fn snapshot_event(&self) -> Result<AgentEvent> {
        AgentEvent::state_snapshot(&self.snapshot())
    }

    // Only add_proverbs and set_proverbs write the list.

    pub(crate) fn extend_proverbs(&mut self, proverbs: Vec<String>) {
        self.proverbs.extend(proverbs);
    }

    pub(crate) fn replace_proverbs(&mut self, proverbs: Vec<String>) {
        self.proverbs = proverbs;
    }
}
