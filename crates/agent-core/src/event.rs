//! Agent Events
//!
//! Events emitted while the agent runs. The shapes follow the AG-UI protocol
//! so a server can forward them to a UI client without translation.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A single event in an agent run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum AgentEvent {
    RunStarted {
        thread_id: String,
        run_id: String,
    },
    RunFinished {
        thread_id: String,
        run_id: String,
    },
    RunError {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },
    TextMessageStart {
        message_id: String,
        role: String,
    },
    TextMessageContent {
        message_id: String,
        delta: String,
    },
    TextMessageEnd {
        message_id: String,
    },
    ToolCallStart {
        tool_call_id: String,
        tool_call_name: String,
    },
    ToolCallArgs {
        tool_call_id: String,
        delta: String,
    },
    ToolCallEnd {
        tool_call_id: String,
    },
    ToolCallResult {
        message_id: String,
        tool_call_id: String,
        content: String,
        role: String,
    },
    /// Full replacement of the client-visible state
    StateSnapshot {
        snapshot: serde_json::Value,
    },
}

impl AgentEvent {
    /// Build a state snapshot from any serializable state
    pub fn state_snapshot<S: Serialize>(state: &S) -> crate::Result<Self> {
        Ok(AgentEvent::StateSnapshot {
            snapshot: serde_json::to_value(state)?,
        })
    }

    /// The AG-UI `type` tag of this event
    pub fn kind(&self) -> &'static str {
        match self {
            AgentEvent::RunStarted { .. } => "RUN_STARTED",
            AgentEvent::RunFinished { .. } => "RUN_FINISHED",
            AgentEvent::RunError { .. } => "RUN_ERROR",
            AgentEvent::TextMessageStart { .. } => "TEXT_MESSAGE_START",
            AgentEvent::TextMessageContent { .. } => "TEXT_MESSAGE_CONTENT",
            AgentEvent::TextMessageEnd { .. } => "TEXT_MESSAGE_END",
            AgentEvent::ToolCallStart { .. } => "TOOL_CALL_START",
            AgentEvent::ToolCallArgs { .. } => "TOOL_CALL_ARGS",
            AgentEvent::ToolCallEnd { .. } => "TOOL_CALL_END",
            AgentEvent::ToolCallResult { .. } => "TOOL_CALL_RESULT",
            AgentEvent::StateSnapshot { .. } => "STATE_SNAPSHOT",
        }
    }
}

/// Sending half of an event channel.
///
/// Sends never fail the run: if the receiver is gone (client disconnected)
/// the event is dropped.
#[derive(Clone, Debug)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<AgentEvent>,
}

impl EventSink {
    /// Create a sink and the receiver that drains it
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<AgentEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn emit(&self, event: AgentEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Event receiver dropped");
        }
    }
}
