//! AG-UI Protocol Adapter
//!
//! Turns a `RunAgentInput` body into an agent run and the run's events into
//! a server-sent event stream:
//!
//! ```text
//! RUN_STARTED
//!   TOOL_CALL_START / ARGS / END   (per tool call)
//!   STATE_SNAPSHOT                 (after add_proverbs / set_proverbs)
//!   TOOL_CALL_RESULT
//!   TEXT_MESSAGE_START / CONTENT / END
//! RUN_FINISHED | RUN_ERROR
//! ```

use agent_core::{Agent, AgentEvent, Conversation, EventSink, Message};
use axum::response::sse::Event;
use proverb_agent::{ProverbSnapshot, ProverbState};
use serde::Deserialize;
use tokio_stream::{wrappers::UnboundedReceiverStream, Stream, StreamExt};

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Body of a `POST /` request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunAgentInput {
    #[serde(default = "new_id")]
    pub thread_id: String,

    #[serde(default = "new_id")]
    pub run_id: String,

    /// Client-held state; only `proverbs` is read
    #[serde(default)]
    pub state: Option<serde_json::Value>,

    #[serde(default)]
    pub messages: Vec<InputMessage>,

    /// Frontend tools; accepted but not offered to the model
    #[serde(default)]
    pub tools: Vec<serde_json::Value>,

    #[serde(default)]
    pub context: Vec<ContextItem>,

    #[serde(default)]
    pub forwarded_props: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputMessage {
    #[serde(default)]
    pub id: Option<String>,
    pub role: String,
    /// A string, or a list of typed parts
    #[serde(default)]
    pub content: serde_json::Value,
    #[serde(default)]
    pub tool_call_id: Option<String>,
}

impl InputMessage {
    /// Message text; for a list of parts, the `text` parts joined in order
    pub fn text(&self) -> String {
        match &self.content {
            serde_json::Value::String(text) => text.clone(),
            serde_json::Value::Array(parts) => parts
                .iter()
                .filter(|part| part["type"] == "text")
                .filter_map(|part| part["text"].as_str())
                .collect(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContextItem {
    pub description: String,
    pub value: String,
}

impl RunAgentInput {
    /// Fresh run state, seeded from the client's proverb list when present
    pub fn session_state(&self, state: ProverbState) -> ProverbState {
        let Some(value) = &self.state else {
            return state;
        };
        match serde_json::from_value::<ProverbSnapshot>(value.clone()) {
            Ok(snapshot) => state.with_proverbs(snapshot.proverbs),
            Err(e) => {
                tracing::warn!(
                    run_id = %self.run_id,
                    error = %e,
                    "Ignoring unreadable client state"
                );
                state
            }
        }
    }

    /// Conversation for the agent: its system prompt, any client context,
    /// then the client's message history
    pub fn conversation(&self, agent: &Agent<ProverbState>) -> Conversation {
        let mut conversation = Conversation::with_system_prompt(agent.build_system_prompt());

        if !self.context.is_empty() {
            let context = self
                .context
                .iter()
                .map(|c| format!("- {}: {}", c.description, c.value))
                .collect::<Vec<_>>()
                .join("\n");
            conversation.push(Message::system(format!("## Context\n{context}")));
        }

        for message in &self.messages {
            let content = message.text();
            let converted = match message.role.as_str() {
                "user" => Message::user(content),
                "assistant" if content.is_empty() => continue,
                "assistant" => Message::assistant(content),
                "system" | "developer" => Message::system(content),
                "tool" => Message::tool(content, message.tool_call_id.clone()),
                other => {
                    tracing::debug!(role = other, "Skipping message with unsupported role");
                    continue;
                }
            };
            conversation.push(converted);
        }

        conversation
    }
}

/// Start the run in the background and stream its events as SSE frames
pub fn run(
    agent: std::sync::Arc<Agent<ProverbState>>,
    session: ProverbState,
    input: RunAgentInput,
) -> impl Stream<Item = Result<Event, axum::Error>> {
    let (sink, rx) = EventSink::channel();
    let mut session = input.session_state(session);
    let mut conversation = input.conversation(&agent);
    let RunAgentInput { thread_id, run_id, .. } = input;

    tracing::info!(%thread_id, %run_id, messages = conversation.len(), "Run started");
    sink.emit(AgentEvent::RunStarted {
        thread_id: thread_id.clone(),
        run_id: run_id.clone(),
    });

    tokio::spawn(async move {
        match agent.run(&mut conversation, &mut session, Some(&sink)).await {
            Ok(_) => {
                tracing::info!(%run_id, proverbs = session.proverbs().len(), "Run finished");
                sink.emit(AgentEvent::RunFinished { thread_id, run_id });
            }
            Err(e) => {
                tracing::error!(%run_id, error = %e, "Run failed");
                sink.emit(AgentEvent::RunError {
                    message: e.user_message(),
                    code: Some(e.code().into()),
                });
            }
        }
    });

    UnboundedReceiverStream::new(rx).map(|event| Event::default().json_data(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proverb_agent::Providers;

    fn input(body: serde_json::Value) -> RunAgentInput {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_minimal_body_gets_ids() {
        let input = input(serde_json::json!({}));
        assert!(!input.thread_id.is_empty());
        assert_ne!(input.thread_id, input.run_id);
        assert!(input.messages.is_empty());
    }

    #[test]
    fn test_state_hydration() {
        let body = input(serde_json::json!({
            "threadId": "t",
            "runId": "r",
            "state": {"proverbs": ["Look before you leap"], "other": 1}
        }));
        let state = body.session_state(ProverbState::new(Providers::demo()));
        assert_eq!(state.proverbs(), ["Look before you leap"]);

        let bad = input(serde_json::json!({"state": {"proverbs": "not a list"}}));
        assert!(bad.session_state(ProverbState::new(Providers::demo())).proverbs().is_empty());
    }

    #[test]
    fn test_camel_case_fields() {
        let body = input(serde_json::json!({
            "threadId": "thread-1",
            "runId": "run-1",
            "messages": [{"id": "m1", "role": "tool", "content": "[]", "toolCallId": "c1"}],
            "forwardedProps": {"x": 1}
        }));
        assert_eq!(body.thread_id, "thread-1");
        assert_eq!(body.messages[0].tool_call_id.as_deref(), Some("c1"));
        assert!(body.forwarded_props.is_some());
    }

    #[test]
    fn test_message_content_shapes() {
        let body = input(serde_json::json!({
            "messages": [
                {"role": "user", "content": "plain"},
                {"role": "user", "content": [
                    {"type": "text", "text": "first "},
                    {"type": "binary", "mimeType": "image/png", "url": "https://example.com/a.png"},
                    {"type": "text", "text": "second"}
                ]},
                {"role": "assistant", "content": null},
                {"role": "assistant"}
            ]
        }));
        let texts: Vec<String> = body.messages.iter().map(InputMessage::text).collect();
        assert_eq!(texts, ["plain", "first second", "", ""]);
    }
}
