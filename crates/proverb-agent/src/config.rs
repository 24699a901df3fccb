//! Provider Configuration
//!
//! Credentials and endpoints for the external providers, read once from the
//! environment. A missing credential is a supported configuration: the
//! matching tool falls back to a fixed demo answer.

use std::fmt;

/// Secret string that never shows up in `Debug` output
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Credentials and base URLs for geocoding, weather and search
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub geo_api_key: Option<ApiKey>,
    pub weather_api_key: Option<ApiKey>,
    pub search_api_key: Option<ApiKey>,
    pub geo_base_url: String,
    pub weather_base_url: String,
    pub search_base_url: String,
}

impl ProviderConfig {
    pub const DEFAULT_GEO_URL: &'static str = "https://api.mapbox.com";
    pub const DEFAULT_WEATHER_URL: &'static str = "https://api.tomorrow.io";
    pub const DEFAULT_SEARCH_URL: &'static str = "https://api.tavily.com";

    /// No credentials: every provider-backed tool answers from its fallback
    pub fn demo() -> Self {
        Self::from_lookup(|_| None)
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let key = |name: &str| lookup(name).filter(|v| !v.is_empty()).map(ApiKey::new);
        let url = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            geo_api_key: key("GEO_API_KEY"),
            weather_api_key: key("WEATHER_API_KEY"),
            search_api_key: key("TAVILY_API_KEY"),
            geo_base_url: url("GEO_API_URL", Self::DEFAULT_GEO_URL),
            weather_base_url: url("WEATHER_API_URL", Self::DEFAULT_WEATHER_URL),
            search_base_url: url("TAVILY_API_URL", Self::DEFAULT_SEARCH_URL),
        }
    }
}
