//! Tomorrow.io Realtime Weather Client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::Instrument;

use super::{fetch_json, join_url, WeatherService};
use crate::config::ApiKey;
use crate::error::Result;
use crate::model::WeatherReport;

#[derive(Debug, Deserialize)]
pub(crate) struct RealtimeResponse {
    data: RealtimeData,
}

#[derive(Debug, Deserialize)]
struct RealtimeData {
    values: RealtimeValues,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RealtimeValues {
    temperature_apparent: f64,
    weather_code: i64,
}

impl RealtimeResponse {
    pub(crate) fn into_report(self) -> WeatherReport {
        let values = self.data.values;
        WeatherReport::from_reading(values.temperature_apparent, values.weather_code)
    }
}

/// Weather service backed by the Tomorrow.io realtime endpoint
pub struct TomorrowWeather {
    client: Client,
    api_key: ApiKey,
    base_url: String,
}

impl TomorrowWeather {
    pub fn new(client: Client, api_key: ApiKey, base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl WeatherService for TomorrowWeather {
    async fn current(&self, lat: f64, lng: f64) -> Result<WeatherReport> {
        let location = format!("{lat},{lng}");
        let request = self
            .client
            .get(join_url(&self.base_url, "v4/weather/realtime"))
            .query(&[
                ("apikey", self.api_key.expose()),
                ("location", location.as_str()),
                ("units", "metric"),
            ]);

        let span = tracing::info_span!("calling weather API", %location);
        let response: RealtimeResponse = fetch_json(request).instrument(span).await?;
        Ok(response.into_report())
    }

    fn name(&self) -> &str {
        "tomorrow.io"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(values: serde_json::Value) -> serde_json::Result<RealtimeResponse> {
        serde_json::from_value(serde_json::json!({
            "data": {"time": "2024-05-01T12:00:00Z", "values": values},
            "location": {"lat": 51.1, "lon": -0.1}
        }))
    }

    #[test]
    fn test_rain_reading() {
        let report = response(serde_json::json!({
            "temperatureApparent": 17.6,
            "weatherCode": 4001,
            "humidity": 80
        }))
        .unwrap()
        .into_report();

        let expected = WeatherReport { temperature: "18°C".into(), description: "Rain".into() };
        assert_eq!(report, expected);
    }

    #[test]
    fn test_unmapped_code() {
        let report = response(serde_json::json!({"temperatureApparent": 9.2, "weatherCode": 9999}))
            .unwrap()
            .into_report();
        assert_eq!(report.description, "Unknown");
    }

    #[test]
    fn test_missing_code_is_decode_error() {
        assert!(response(serde_json::json!({"temperatureApparent": 9.2})).is_err());
    }
}
