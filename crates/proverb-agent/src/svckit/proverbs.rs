//! Proverb List Tools
//!
//! Read, append to, or replace the run's proverb list. Both mutating tools
//! answer with the post-mutation list and attach a `STATE_SNAPSHOT` event.

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema,
    Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::state::ProverbState;

fn proverbs_param(description: &str) -> ParameterSchema {
    ParameterSchema::required("proverbs", "array", description)
}

fn snapshot_result(name: &str, state: &ProverbState) -> CoreResult<ToolResult> {
    Ok(ToolResult::json(name, &state.snapshot())?.with_event(state.snapshot_event()?))
}

/// Returns the current list
pub struct GetProverbsTool;

#[async_trait]
impl Tool<ProverbState> for GetProverbsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_proverbs".into(),
            description: "Get the current list of proverbs.".into(),
            parameters: Vec::new(),
            category: Some("proverbs".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, state: &mut ProverbState, _call: &ToolCall) -> CoreResult<ToolResult> {
        tracing::debug!(count = state.proverbs().len(), "Getting proverbs");
        ToolResult::json("get_proverbs", &state.proverbs())
    }
}

/// Appends to the list
pub struct AddProverbsTool;

#[async_trait]
impl Tool<ProverbState> for AddProverbsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "add_proverbs".into(),
            description: "Add proverbs to the end of the current list.".into(),
            parameters: vec![proverbs_param("Proverbs to append, as an array of strings")],
            category: Some("proverbs".into()),
            has_side_effects: true,
        }
    }

    async fn execute(&self, state: &mut ProverbState, call: &ToolCall) -> CoreResult<ToolResult> {
        let proverbs: Vec<String> = call.arg("proverbs")?;
        tracing::debug!(added = proverbs.len(), "Adding proverbs");
        state.extend_proverbs(proverbs);
        snapshot_result("add_proverbs", state)
    }
}

/// Replaces the list
pub struct SetProverbsTool;

#[async_trait]
impl Tool<ProverbState> for SetProverbsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "set_proverbs".into(),
            description: "Replace the whole list of proverbs.".into(),
            parameters: vec![proverbs_param("The complete new list, as an array of strings")],
            category: Some("proverbs".into()),
            has_side_effects: true,
        }
    }

    async fn execute(&self, state: &mut ProverbState, call: &ToolCall) -> CoreResult<ToolResult> {
        let proverbs: Vec<String> = call.arg("proverbs")?;
        tracing::debug!(count = proverbs.len(), "Setting proverbs");
        state.replace_proverbs(proverbs);
        snapshot_result("set_proverbs", state)
    }
}
