//! Geocoding Tool

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema,
    Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::state::ProverbState;

/// Resolves a place description to coordinates
pub struct GetLatLngTool;

#[async_trait]
impl Tool<ProverbState> for GetLatLngTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_lat_lng".into(),
            description: "Get the latitude and longitude of a location. \
                          Returns {\"lat\", \"lng\"}."
                .into(),
            parameters: vec![ParameterSchema::required(
                "location_description",
                "string",
                "A description of a location, e.g. 'Paris, France'",
            )],
            category: Some("location".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, state: &mut ProverbState, call: &ToolCall) -> CoreResult<ToolResult> {
        let description: String = call.arg("location_description")?;
        let point = state.providers().geocoder.locate(&description).await?;
        ToolResult::json("get_lat_lng", &point)
    }
}
