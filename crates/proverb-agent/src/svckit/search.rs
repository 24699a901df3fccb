//! Web Search Tool

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema,
    Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::model::SearchOptions;
use crate::state::ProverbState;

/// Searches the web, forwarding only the options the model supplied
pub struct SearchTool;

impl SearchTool {
    fn options(call: &ToolCall) -> CoreResult<SearchOptions> {
        Ok(SearchOptions {
            search_depth: call.opt_arg("search_depth")?,
            topic: call.opt_arg("topic")?,
            time_range: call.opt_arg("time_range")?,
        })
    }
}

#[async_trait]
impl Tool<ProverbState> for SearchTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search".into(),
            description: "Search the web. Returns a list of {title, url, content, score}.".into(),
            parameters: vec![
                ParameterSchema::required("query", "string", "The search query"),
                ParameterSchema::optional("search_depth", "string", "How thoroughly to search")
                    .with_enum(&["basic", "advanced"])
                    .with_default(serde_json::json!("basic")),
                ParameterSchema::optional("topic", "string", "Category of the search")
                    .with_enum(&["general", "news"])
                    .with_default(serde_json::json!("general")),
                ParameterSchema::optional("time_range", "string", "Only return results this recent")
                    .with_enum(&["day", "week", "month", "year"]),
            ],
            category: Some("search".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, state: &mut ProverbState, call: &ToolCall) -> CoreResult<ToolResult> {
        let query: String = call.arg("query")?;
        let options = Self::options(call)?;
        let results = state.providers().search.search(&query, &options).await?;
        ToolResult::json("search", &results)
    }
}
