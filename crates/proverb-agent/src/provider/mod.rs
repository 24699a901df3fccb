//! Provider Integration
//!
//! Clients for the third-party services behind the tools. Each capability is
//! a trait with two implementations: the live HTTP client and a fixed
//! fallback used when no credential is configured.

mod fallback;
mod mapbox;
mod tavily;
mod tomorrow;

pub use fallback::{DemoGeocoder, DemoSearch, DemoWeather};
pub use mapbox::MapboxGeocoder;
pub use tavily::TavilySearch;
pub use tomorrow::TomorrowWeather;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::model::{GeoPoint, SearchOptions, SearchResult, WeatherReport};

/// Resolves a free-text place description to coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn locate(&self, description: &str) -> Result<GeoPoint>;

    /// Provider name, for logs
    fn name(&self) -> &str;
}

/// Current weather at a coordinate
#[async_trait]
pub trait WeatherService: Send + Sync {
    async fn current(&self, lat: f64, lng: f64) -> Result<WeatherReport>;

    fn name(&self) -> &str;
}

/// Web search
#[async_trait]
pub trait SearchService: Send + Sync {
    async fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<SearchResult>>;

    fn name(&self) -> &str;
}

/// Send a request, fail on non-success status, decode the JSON body.
///
/// The body is decoded separately so shape mismatches surface as
/// `ProverbError::Decode` rather than as transport errors.
async fn fetch_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T> {
    let response = request.send().await?.error_for_status()?;
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
