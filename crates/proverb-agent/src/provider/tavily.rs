//! Tavily Search Client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{fetch_json, join_url, SearchService};
use crate::config::ApiKey;
use crate::error::Result;
use crate::model::{SearchOptions, SearchResult};

#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    query: &'a str,
    #[serde(flatten)]
    options: &'a SearchOptions,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    results: Vec<SearchResult>,
}

/// Search service backed by the Tavily search endpoint
pub struct TavilySearch {
    client: Client,
    api_key: ApiKey,
    base_url: String,
}

impl TavilySearch {
    pub fn new(client: Client, api_key: ApiKey, base_url: impl Into<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SearchService for TavilySearch {
    async fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<SearchResult>> {
        let request = self
            .client
            .post(join_url(&self.base_url, "search"))
            .bearer_auth(self.api_key.expose())
            .json(&SearchRequest { query, options });

        let response: SearchResponse = fetch_json(request).await?;
        tracing::debug!(%query, results = response.results.len(), "Search finished");
        Ok(response.results)
    }

    fn name(&self) -> &str {
        "tavily"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SearchDepth, SearchTopic};

    #[test]
    fn test_request_omits_unset_options() {
        let options = SearchOptions::default();
        let request = SearchRequest { query: "proverbs", options: &options };
        let body = serde_json::to_value(request).unwrap();
        assert_eq!(body, serde_json::json!({"query": "proverbs"}));
    }

    #[test]
    fn test_request_includes_supplied_options() {
        let options = SearchOptions {
            search_depth: Some(SearchDepth::Advanced),
            topic: Some(SearchTopic::News),
            time_range: None,
        };
        let body = serde_json::to_value(SearchRequest { query: "q", options: &options }).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"query": "q", "search_depth": "advanced", "topic": "news"})
        );
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let response: SearchResponse = serde_json::from_value(serde_json::json!({
            "query": "q",
            "response_time": 0.4,
            "results": [
                {
                    "title": "A",
                    "url": "https://a",
                    "content": "a",
                    "score": 0.9,
                    "raw_content": null
                }
            ]
        }))
        .unwrap();
        assert_eq!(response.results.len(), 1);
        assert!((response.results[0].score - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_result_missing_field_is_rejected() {
        let response = serde_json::from_value::<SearchResponse>(serde_json::json!({
            "results": [{"title": "A", "url": "https://a", "score": 0.9}]
        }));
        assert!(response.is_err());
    }
}
