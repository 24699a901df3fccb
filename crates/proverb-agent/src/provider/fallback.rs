//! Fallback Providers
//!
//! Fixed answers used when a provider credential is absent.

use async_trait::async_trait;

use super::{Geocoder, SearchService, WeatherService};
use crate::error::Result;
use crate::model::{GeoPoint, SearchOptions, SearchResult, WeatherReport};

/// Always answers London
pub struct DemoGeocoder;

impl DemoGeocoder {
    pub const LOCATION: GeoPoint = GeoPoint::new(51.1, -0.1);
}

#[async_trait]
impl Geocoder for DemoGeocoder {
    async fn locate(&self, description: &str) -> Result<GeoPoint> {
        tracing::debug!(%description, "No geocoding key, using demo location");
        Ok(Self::LOCATION)
    }

    fn name(&self) -> &str {
        "demo"
    }
}

/// Always answers a sunny 21°C
pub struct DemoWeather;

impl DemoWeather {
    pub fn report() -> WeatherReport {
        WeatherReport {
            temperature: "21°C".into(),
            description: "Sunny".into(),
        }
    }
}

#[async_trait]
impl WeatherService for DemoWeather {
    async fn current(&self, lat: f64, lng: f64) -> Result<WeatherReport> {
        tracing::debug!(lat, lng, "No weather key, using demo reading");
        Ok(Self::report())
    }

    fn name(&self) -> &str {
        "demo"
    }
}

/// Finds nothing
pub struct DemoSearch;

#[async_trait]
impl SearchService for DemoSearch {
    async fn search(&self, query: &str, _options: &SearchOptions) -> Result<Vec<SearchResult>> {
        tracing::debug!(%query, "No search key, returning no results");
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "demo"
    }
}
