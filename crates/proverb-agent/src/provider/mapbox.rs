//! Mapbox Geocoding Client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{fetch_json, join_url, Geocoder};
use crate::config::ApiKey;
use crate::error::{ProverbError, Result};
use crate::model::GeoPoint;

#[derive(Debug, Deserialize)]
pub(crate) struct PlacesResponse {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    /// `[longitude, latitude]`
    center: (f64, f64),
}

impl PlacesResponse {
    /// First match, or the retryable not-found signal
    pub(crate) fn first_match(&self) -> Result<GeoPoint> {
        self.features
            .first()
            .map(|f| GeoPoint::new(f.center.1, f.center.0))
            .ok_or(ProverbError::LocationNotFound)
    }
}

/// Geocoder backed by the Mapbox places endpoint
pub struct MapboxGeocoder {
    client: Client,
    api_key: ApiKey,
    base_url: String,
}

impl MapboxGeocoder {
    pub fn new(client: Client, api_key: ApiKey, base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.into(),
        }
    }

    fn places_url(&self, description: &str) -> String {
        let path = format!(
            "geocoding/v5/mapbox.places/{}.json",
            urlencoding::encode(description)
        );
        join_url(&self.base_url, &path)
    }
}

#[async_trait]
impl Geocoder for MapboxGeocoder {
    async fn locate(&self, description: &str) -> Result<GeoPoint> {
        let request = self
            .client
            .get(self.places_url(description))
            .query(&[("access_token", self.api_key.expose())]);

        let places: PlacesResponse = fetch_json(request).await?;
        let point = places.first_match()?;
        tracing::debug!(%description, lat = point.lat, lng = point.lng, "Geocoded location");
        Ok(point)
    }

    fn name(&self) -> &str {
        "mapbox"
    }
}
