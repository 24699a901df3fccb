//! Reasoning Loop
//!
//! Implements the ReAct (Reason + Act) pattern for agent behavior.
//! The agent observes, thinks, acts (via tools), and responds.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{AgentError, Result};
use crate::event::{AgentEvent, EventSink};
use crate::message::{Conversation, Message, Role};
use crate::provider::{GenerationOptions, LlmProvider};
use crate::tool::{Tool, ToolCall, ToolRegistry, ToolResult};

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// System prompt template
    pub system_prompt: String,

    /// Maximum reasoning iterations before giving up
    pub max_iterations: usize,

    /// How many times a single tool may ask the model to try again
    pub max_tool_retries: usize,

    /// Generation options
    pub generation: GenerationOptions,

    /// Whether to append tool descriptions to system prompt
    pub inject_tool_descriptions: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            max_iterations: 10,
            max_tool_retries: 1,
            generation: GenerationOptions::default(),
            inject_tool_descriptions: true,
        }
    }
}

const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a helpful AI assistant.

When you need to use a tool, respond with a JSON block in this exact format:
```tool
{"tool": "tool_name", "arguments": {"arg1": "value1"}}
```

After receiving tool results, synthesize them into a helpful response.
If you can answer directly without tools, do so.
Be concise and accurate."#;

/// The main Agent struct
///
/// `D` is the per-run dependency type handed to every tool call.
pub struct Agent<D: Send + 'static> {
    provider: Arc<dyn LlmProvider>,
    tools: Arc<ToolRegistry<D>>,
    config: AgentConfig,
}

impl<D: Send + 'static> Agent<D> {
    /// Create a new agent
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        tools: Arc<ToolRegistry<D>>,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider,
            tools,
            config,
        }
    }

    /// Build the full system prompt including tool descriptions
    pub fn build_system_prompt(&self) -> String {
        let mut prompt = self.config.system_prompt.clone();

        if self.config.inject_tool_descriptions && !self.tools.is_empty() {
            prompt.push_str("\n\n");
            prompt.push_str(&self.tools.generate_prompt_section());
        }

        prompt
    }

    /// Run the agent over a conversation, executing tools against `deps`.
    ///
    /// Tool activity and the final answer are reported to `events` when given.
    pub async fn run(
        &self,
        conversation: &mut Conversation,
        deps: &mut D,
        events: Option<&EventSink>,
    ) -> Result<String> {
        // Ensure system prompt is set
        if conversation.messages().first().map(|m| &m.role) != Some(&Role::System) {
            let messages = conversation.messages_mut();
            messages.insert(0, Message::system(self.build_system_prompt()));
        }

        let mut retries: HashMap<String, usize> = HashMap::new();
        let mut iterations = 0;

        loop {
            iterations += 1;

            if iterations > self.config.max_iterations {
                return Err(AgentError::MaxIterations(self.config.max_iterations));
            }

            conversation.truncate_to_fit();

            let completion = self.provider
                .complete(conversation.messages(), &self.config.generation)
                .await?;

            let content = completion.content;
            conversation.push(Message::assistant(&content));

            let Some(call) = self.parse_tool_call(&content) else {
                // No tool call - this is the final response
                if let Some(sink) = events {
                    emit_text_message(sink, &content);
                }
                return Ok(content);
            };

            let call_id = call.id.clone().unwrap_or_else(new_id);
            tracing::debug!(tool = %call.name, call_id = %call_id, "Executing tool");

            if let Some(sink) = events {
                sink.emit(AgentEvent::ToolCallStart {
                    tool_call_id: call_id.clone(),
                    tool_call_name: call.name.clone(),
                });
                sink.emit(AgentEvent::ToolCallArgs {
                    tool_call_id: call_id.clone(),
                    delta: call.arguments_json(),
                });
                sink.emit(AgentEvent::ToolCallEnd {
                    tool_call_id: call_id.clone(),
                });
            }

            let tool_output = match self.tools.execute(deps, &call).await {
                Ok(result) => {
                    retries.remove(&call.name);
                    if let Some(sink) = events {
                        for event in &result.events {
                            sink.emit(event.clone());
                        }
                    }
                    format_tool_result(&result)
                }
                Err(e) if e.is_model_recoverable() => {
                    let used = retries.entry(call.name.clone()).or_insert(0);
                    if *used >= self.config.max_tool_retries {
                        tracing::warn!(tool = %call.name, error = %e, "Tool retries exhausted");
                        emit_tool_result(events, &call_id, format_failure(&call.name, &e));
                        return Err(AgentError::ToolRetriesExceeded {
                            tool: call.name,
                            max: self.config.max_tool_retries,
                        });
                    }
                    *used += 1;
                    tracing::info!(
                        tool = %call.name,
                        attempt = *used,
                        error = %e,
                        "Tool asked for a retry"
                    );
                    format_retry(&call, &e)
                }
                Err(e) => {
                    tracing::warn!(tool = %call.name, error = %e, "Tool failed");
                    emit_tool_result(events, &call_id, format_failure(&call.name, &e));
                    return Err(e);
                }
            };

            emit_tool_result(events, &call_id, tool_output.clone());
            conversation.push(Message::tool(tool_output, Some(call_id)));
        }
    }

    /// Parse a tool call from LLM response
    fn parse_tool_call(&self, content: &str) -> Option<ToolCall> {
        // Look for ```tool ... ``` blocks
        let tool_start = "```tool";
        let tool_end = "```";

        if let Some(start_idx) = content.find(tool_start) {
            let after_marker = &content[start_idx + tool_start.len()..];
            if let Some(end_idx) = after_marker.find(tool_end) {
                let json_str = after_marker[..end_idx].trim();
                if let Ok(call) = serde_json::from_str::<ToolCall>(json_str) {
                    return Some(call);
                }
            }
        }

        // Fallback: try to find raw JSON with "tool" key
        Self::parse_inline_tool_call(content)
    }

    /// Try to parse inline JSON tool call
    fn parse_inline_tool_call(content: &str) -> Option<ToolCall> {
        if !content.contains(r#""tool""#) {
            return None;
        }

        let start = content.find('{')?;
        let end = content.rfind('}')?;

        if end <= start {
            return None;
        }

        serde_json::from_str::<ToolCall>(&content[start..=end]).ok()
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn emit_text_message(sink: &EventSink, content: &str) {
    let message_id = new_id();
    sink.emit(AgentEvent::TextMessageStart {
        message_id: message_id.clone(),
        role: Role::Assistant.to_string(),
    });
    sink.emit(AgentEvent::TextMessageContent {
        message_id: message_id.clone(),
        delta: content.to_string(),
    });
    sink.emit(AgentEvent::TextMessageEnd { message_id });
}

/// Close a client-visible tool call with its result text
fn emit_tool_result(events: Option<&EventSink>, call_id: &str, content: String) {
    if let Some(sink) = events {
        sink.emit(AgentEvent::ToolCallResult {
            message_id: new_id(),
            tool_call_id: call_id.to_string(),
            content,
            role: Role::Tool.to_string(),
        });
    }
}

/// Format tool result for conversation
fn format_tool_result(result: &ToolResult) -> String {
    format!("[Tool '{}' returned]\n{}", result.name, result.output)
}

fn format_failure(tool: &str, error: &AgentError) -> String {
    format!("[Tool '{}' failed]\n{}", tool, error)
}

fn format_retry(call: &ToolCall, error: &AgentError) -> String {
    let reason = match error {
        AgentError::ToolRetry(msg) => msg.clone(),
        other => other.to_string(),
    };
    format!(
        "[Tool '{}' asked for a retry]\n{}\nFix the errors and try again.",
        call.name, reason
    )
}

/// Builder for Agent configuration
pub struct AgentBuilder<D: Send + 'static> {
    provider: Option<Arc<dyn LlmProvider>>,
    tools: ToolRegistry<D>,
    config: AgentConfig,
}

impl<D: Send + 'static> Default for AgentBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Send + 'static> AgentBuilder<D> {
    pub fn new() -> Self {
        Self {
            provider: None,
            tools: ToolRegistry::new(),
            config: AgentConfig::default(),
        }
    }

    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn tool<T: Tool<D> + 'static>(mut self, tool: T) -> Self {
        self.tools.register(tool);
        self
    }

    pub fn tools(mut self, tools: ToolRegistry<D>) -> Self {
        self.tools = tools;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.generation.model = model.into();
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn build(self) -> Result<Agent<D>> {
        let provider = self.provider
            .ok_or_else(|| AgentError::Config("Provider is required".into()))?;

        Ok(Agent::new(provider, Arc::new(self.tools), self.config))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::provider::{Completion, ModelInfo};
    use crate::tool::ToolSchema;

    /// Replies with canned responses in order
    struct ScriptedProvider {
        replies: Mutex<VecDeque<String>>,
    }

    impl ScriptedProvider {
        fn new(replies: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.iter().map(|r| (*r).to_string()).collect()),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        async fn complete(
            &self,
            _messages: &[Message],
            options: &GenerationOptions,
        ) -> Result<Completion> {
            let reply = self.replies.lock().unwrap().pop_front().unwrap_or_else(|| "done".into());
            Ok(Completion::text(&options.model, reply))
        }

        async fn list_models(&self) -> Result<Vec<ModelInfo>> {
            Ok(Vec::new())
        }
    }

    /// Pushes its `item` argument. An empty item asks for a retry; `boom` fails outright.
    struct PushTool;

    #[async_trait]
    impl Tool<Vec<String>> for PushTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "push".into(),
                description: "Push an item".into(),
                parameters: vec![crate::tool::ParameterSchema::required("item", "string", "Item")],
                category: None,
                has_side_effects: true,
            }
        }

        async fn execute(&self, deps: &mut Vec<String>, call: &ToolCall) -> Result<ToolResult> {
            let item: String = call.arg("item")?;
            if item.is_empty() {
                return Err(AgentError::ToolRetry("Item must not be empty".into()));
            }
            if item == "boom" {
                return Err(AgentError::ToolExecution("upstream returned 500".into()));
            }
            deps.push(item);
            let snapshot = AgentEvent::state_snapshot(&*deps)?;
            Ok(ToolResult::success("push", "ok").with_event(snapshot))
        }
    }

    fn agent(provider: Arc<ScriptedProvider>) -> Agent<Vec<String>> {
        AgentBuilder::new().provider(provider).tool(PushTool).build().unwrap()
    }

    async fn ask(
        agent: &Agent<Vec<String>>,
        question: &str,
        items: &mut Vec<String>,
    ) -> Result<String> {
        let mut conversation = Conversation::new();
        conversation.push(Message::user(question));
        agent.run(&mut conversation, items, None).await
    }

    fn push_call(item: &str) -> String {
        format!("```tool\n{{\"tool\": \"push\", \"arguments\": {{\"item\": \"{item}\"}}}}\n```")
    }

    #[tokio::test]
    async fn test_tool_then_answer() {
        let provider = ScriptedProvider::new(&[&push_call("a"), "Pushed it."]);
        let mut items = Vec::new();

        let answer = ask(&agent(provider), "push a", &mut items).await.unwrap();

        assert_eq!(answer, "Pushed it.");
        assert_eq!(items, vec!["a"]);
    }

    #[tokio::test]
    async fn test_events_are_emitted_in_order() {
        let provider = ScriptedProvider::new(&[&push_call("a"), "Pushed it."]);
        let agent = agent(provider);
        let (sink, mut rx) = EventSink::channel();
        let mut conversation = Conversation::new();
        conversation.push(Message::user("push a"));

        agent.run(&mut conversation, &mut Vec::new(), Some(&sink)).await.unwrap();
        drop(sink);

        let mut kinds = Vec::new();
        while let Some(event) = rx.recv().await {
            kinds.push(event.kind());
        }
        assert_eq!(
            kinds,
            vec![
                "TOOL_CALL_START",
                "TOOL_CALL_ARGS",
                "TOOL_CALL_END",
                "STATE_SNAPSHOT",
                "TOOL_CALL_RESULT",
                "TEXT_MESSAGE_START",
                "TEXT_MESSAGE_CONTENT",
                "TEXT_MESSAGE_END",
            ]
        );
    }

    #[tokio::test]
    async fn test_retry_signal_lets_model_reformulate() {
        let provider = ScriptedProvider::new(&[&push_call(""), &push_call("b"), "Done."]);
        let mut items = Vec::new();

        let answer = ask(&agent(provider), "push", &mut items).await.unwrap();

        assert_eq!(answer, "Done.");
        assert_eq!(items, vec!["b"]);
    }

    #[tokio::test]
    async fn test_retries_exhausted() {
        let provider = ScriptedProvider::new(&[&push_call(""), &push_call("")]);
        let mut items = Vec::new();

        let err = ask(&agent(provider), "push", &mut items).await.unwrap_err();

        assert!(matches!(
            err,
            AgentError::ToolRetriesExceeded { ref tool, max: 1 } if tool == "push"
        ));
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_fatal_tool_error_closes_tool_call() {
        let provider = ScriptedProvider::new(&[&push_call("boom"), "unreachable"]);
        let agent = agent(provider);
        let (sink, mut rx) = EventSink::channel();
        let mut conversation = Conversation::new();
        conversation.push(Message::user("push boom"));

        let err = agent.run(&mut conversation, &mut Vec::new(), Some(&sink)).await.unwrap_err();
        drop(sink);
        assert!(matches!(err, AgentError::ToolExecution(_)));

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        let kinds: Vec<_> = events.iter().map(AgentEvent::kind).collect();
        assert_eq!(
            kinds,
            vec!["TOOL_CALL_START", "TOOL_CALL_ARGS", "TOOL_CALL_END", "TOOL_CALL_RESULT"]
        );

        match (&events[0], &events[3]) {
            (
                AgentEvent::ToolCallStart { tool_call_id: started, .. },
                AgentEvent::ToolCallResult { tool_call_id, content, .. },
            ) => {
                assert_eq!(started, tool_call_id);
                assert!(content.starts_with("[Tool 'push' failed]"));
                assert!(content.contains("upstream returned 500"));
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_exhausted_retries_close_tool_call() {
        let provider = ScriptedProvider::new(&[&push_call(""), &push_call("")]);
        let agent = agent(provider);
        let (sink, mut rx) = EventSink::channel();
        let mut conversation = Conversation::new();
        conversation.push(Message::user("push"));

        agent.run(&mut conversation, &mut Vec::new(), Some(&sink)).await.unwrap_err();
        drop(sink);

        let mut results = 0;
        while let Some(event) = rx.recv().await {
            if event.kind() == "TOOL_CALL_RESULT" {
                results += 1;
            }
        }
        assert_eq!(results, 2);
    }

    #[tokio::test]
    async fn test_max_iterations() {
        let replies: Vec<String> = (0..5).map(|i| push_call(&i.to_string())).collect();
        let replies: Vec<&str> = replies.iter().map(String::as_str).collect();
        let provider = ScriptedProvider::new(&replies);
        let agent: Agent<Vec<String>> = AgentBuilder::new()
            .provider(provider)
            .tool(PushTool)
            .max_iterations(3)
            .build()
            .unwrap();

        let err = ask(&agent, "loop", &mut Vec::new()).await.unwrap_err();
        assert!(matches!(err, AgentError::MaxIterations(3)));
    }

    #[test]
    fn test_parse_inline_tool_call() {
        let call = Agent::<Vec<String>>::parse_inline_tool_call(
            r#"Sure: {"tool": "push", "arguments": {"item": "x"}}"#,
        )
        .unwrap();
        assert_eq!(call.name, "push");
        assert_eq!(call.arguments["item"], "x");
    }

    #[test]
    fn test_builder_requires_provider() {
        let result = AgentBuilder::<Vec<String>>::new().build();
        assert!(matches!(result, Err(AgentError::Config(_))));
    }
}
