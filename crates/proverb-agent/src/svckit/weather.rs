//! Weather Tool

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema,
    Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::state::ProverbState;

/// Current conditions at a coordinate
pub struct GetWeatherTool;

#[async_trait]
impl Tool<ProverbState> for GetWeatherTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_weather".into(),
            description: "Get the current weather at a location. \
                          Use get_lat_lng first to find coordinates."
                .into(),
            parameters: vec![
                ParameterSchema::required("lat", "number", "Latitude of the location"),
                ParameterSchema::required("lng", "number", "Longitude of the location"),
            ],
            category: Some("weather".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, state: &mut ProverbState, call: &ToolCall) -> CoreResult<ToolResult> {
        // No range check; the provider sees whatever the model sent.
        let lat: f64 = call.arg("lat")?;
        let lng: f64 = call.arg("lng")?;
        let report = state.providers().weather.current(lat, lng).await?;
        ToolResult::json("get_weather", &report)
    }
}
