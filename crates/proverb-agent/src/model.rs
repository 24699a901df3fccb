//! Domain Models
//!
//! Values the tools hand back to the agent, plus the client-visible state.

use serde::{Deserialize, Serialize};

/// Coordinates returned by `get_lat_lng`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Current conditions returned by `get_weather`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Apparent temperature, e.g. `"18°C"`
    pub temperature: String,

    /// Condition label, `"Unknown"` for codes outside the table
    pub description: String,
}

impl WeatherReport {
    /// Build a report from a raw provider reading
    pub fn from_reading(apparent_celsius: f64, weather_code: i64) -> Self {
        Self {
            temperature: format!("{apparent_celsius:.0}°C"),
            description: describe_weather_code(weather_code).to_string(),
        }
    }
}

/// Label used for weather codes outside the table
pub const UNKNOWN_WEATHER: &str = "Unknown";

/// Tomorrow.io weather code table
/// (<https://docs.tomorrow.io/reference/data-layers-weather-codes>)
pub fn describe_weather_code(code: i64) -> &'static str {
    match code {
        1000 => "Clear, Sunny",
        1100 => "Mostly Clear",
        1101 => "Partly Cloudy",
        1102 => "Mostly Cloudy",
        1001 => "Cloudy",
        2000 => "Fog",
        2100 => "Light Fog",
        4000 => "Drizzle",
        4001 => "Rain",
        4200 => "Light Rain",
        4201 => "Heavy Rain",
        5000 => "Snow",
        5001 => "Flurries",
        5100 => "Light Snow",
        5101 => "Heavy Snow",
        6000 => "Freezing Drizzle",
        6001 => "Freezing Rain",
        6200 => "Light Freezing Rain",
        6201 => "Heavy Freezing Rain",
        7000 => "Ice Pellets",
        7101 => "Heavy Ice Pellets",
        7102 => "Light Ice Pellets",
        8000 => "Thunderstorm",
        _ => UNKNOWN_WEATHER,
    }
}

/// One web search hit. Every field is required when decoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    /// Short snippet of the page
    pub content: String,
    /// Relevance score assigned by the provider
    pub score: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Basic,
    Advanced,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchTopic {
    General,
    News,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Day,
    Week,
    Month,
    Year,
}

/// Optional search parameters. Unset fields are left out of the request so
/// the provider applies its own defaults (`basic`, `general`, unbounded).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_depth: Option<SearchDepth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<SearchTopic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
}

/// Client-visible state, as carried by `STATE_SNAPSHOT` events and by the
/// `state` field of incoming runs
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProverbSnapshot {
    #[serde(default)]
    pub proverbs: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_report_rounds_and_maps() {
        let report = WeatherReport::from_reading(17.6, 4001);
        assert_eq!(report.temperature, "18°C");
        assert_eq!(report.description, "Rain");
    }

    #[test]
    fn test_unmapped_code_is_unknown() {
        assert_eq!(WeatherReport::from_reading(3.0, 9999).description, "Unknown");
        assert_eq!(describe_weather_code(-1), UNKNOWN_WEATHER);
    }

    #[test]
    fn test_code_table_is_complete() {
        let codes = [
            1000, 1100, 1101, 1102, 1001, 2000, 2100, 4000, 4001, 4200, 4201, 5000, 5001, 5100,
            5101, 6000, 6001, 6200, 6201, 7000, 7101, 7102, 8000,
        ];
        assert_eq!(codes.len(), 23);
        assert!(codes.iter().all(|c| describe_weather_code(*c) != UNKNOWN_WEATHER));
        assert_eq!(describe_weather_code(1000), "Clear, Sunny");
        assert_eq!(describe_weather_code(8000), "Thunderstorm");
    }

    #[test]
    fn test_negative_temperature() {
        assert_eq!(WeatherReport::from_reading(-4.2, 5000).temperature, "-4°C");
    }

    #[test]
    fn test_search_options_skip_unset() {
        let options = SearchOptions {
            time_range: Some(TimeRange::Week),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            serde_json::json!({"time_range": "week"})
        );
    }

    #[test]
    fn test_search_result_requires_score() {
        let missing = serde_json::json!({"title": "t", "url": "u", "content": "c"});
        assert!(serde_json::from_value::<SearchResult>(missing).is_err());
    }
}
