//! Tool System
//!
//! Extensible tool framework for agent capabilities.
//! Tools are registered once at startup and invoked by the reasoning loop
//! against per-run dependencies (`D`), so the registry itself stays shared
//! and read-only while each run owns its own mutable state.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::error::{AgentError, Result};
use crate::event::AgentEvent;

/// Tool call request from the LLM
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool identifier
    #[serde(alias = "tool")]
    pub name: String,

    /// Arguments as key-value pairs
    #[serde(default)]
    pub arguments: HashMap<String, serde_json::Value>,

    /// Optional call ID for tracking
    #[serde(default)]
    pub id: Option<String>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: HashMap::new(),
            id: None,
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.arguments.insert(key.into(), value);
        self
    }

    /// Decode a required argument
    pub fn arg<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self.arguments.get(key).ok_or_else(|| {
            AgentError::ToolValidation(format!("Missing required parameter: {}", key))
        })?;
        serde_json::from_value(value.clone()).map_err(|e| {
            AgentError::ToolValidation(format!("Invalid value for '{}': {}", key, e))
        })
    }

    /// Decode an optional argument; `null` counts as absent
    pub fn opt_arg<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.arguments.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(_) => self.arg(key).map(Some),
        }
    }

    /// Arguments serialized with a stable key order
    pub fn arguments_json(&self) -> String {
        let ordered: BTreeMap<_, _> = self.arguments.iter().collect();
        serde_json::to_string(&ordered).unwrap_or_else(|_| "{}".into())
    }
}

/// Result from tool execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool that was called
    pub name: String,

    /// Text handed back to the model
    pub output: String,

    /// Structured data (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Events to forward to the client (e.g. state snapshots)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<AgentEvent>,
}

impl ToolResult {
    pub fn success(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output: output.into(),
            data: None,
            events: Vec::new(),
        }
    }

    /// Successful result whose output is the JSON rendering of `value`
    pub fn json<T: Serialize>(name: impl Into<String>, value: &T) -> Result<Self> {
        let data = serde_json::to_value(value)?;
        Ok(Self::success(name, data.to_string()).with_data(data))
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_event(mut self, event: AgentEvent) -> Self {
        self.events.push(event);
        self
    }
}

/// Parameter definition for tool schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Parameter name
    pub name: String,

    /// JSON Schema type (string, number, boolean, object, array)
    #[serde(rename = "type")]
    pub param_type: String,

    /// Human-readable description
    pub description: String,

    /// Whether this parameter is required
    #[serde(default)]
    pub required: bool,

    /// Default value if not provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    /// Enum of allowed values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,
}

impl ParameterSchema {
    pub fn required(
        name: impl Into<String>,
        param_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            description: description.into(),
            required: true,
            default: None,
            enum_values: None,
        }
    }

    pub fn optional(
        name: impl Into<String>,
        param_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            required: false,
            ..Self::required(name, param_type, description)
        }
    }

    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_enum(mut self, values: &[&str]) -> Self {
        self.enum_values = Some(values.iter().map(|v| serde_json::json!(v)).collect());
        self
    }
}

/// Tool definition schema (for LLM function calling)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool identifier
    pub name: String,

    /// Human-readable description (shown to LLM)
    pub description: String,

    /// Parameter definitions
    pub parameters: Vec<ParameterSchema>,

    /// Category for grouping
    #[serde(default)]
    pub category: Option<String>,

    /// Whether tool has side effects
    #[serde(default)]
    pub has_side_effects: bool,
}

/// Tool trait - implement to add new capabilities
///
/// `D` is the per-run dependency type the tool reads and mutates.
#[async_trait]
pub trait Tool<D: Send + 'static>: Send + Sync {
    /// Get the tool's schema for LLM function calling
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments
    async fn execute(&self, deps: &mut D, call: &ToolCall) -> Result<ToolResult>;

    /// Validate arguments before execution (optional)
    fn validate(&self, call: &ToolCall) -> Result<()> {
        let schema = self.schema();

        for param in &schema.parameters {
            let value = call.arguments.get(&param.name);

            if param.required && value.is_none() {
                return Err(AgentError::ToolValidation(format!(
                    "Missing required parameter: {}",
                    param.name
                )));
            }

            if let (Some(allowed), Some(value)) = (&param.enum_values, value) {
                if !value.is_null() && !allowed.contains(value) {
                    return Err(AgentError::ToolValidation(format!(
                        "Invalid value for '{}': {} (expected one of {})",
                        param.name,
                        value,
                        serde_json::Value::Array(allowed.clone())
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Registry for available tools
pub struct ToolRegistry<D: Send + 'static> {
    tools: HashMap<String, Arc<dyn Tool<D>>>,
}

impl<D: Send + 'static> Default for ToolRegistry<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Send + 'static> ToolRegistry<D> {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a new tool
    pub fn register<T: Tool<D> + 'static>(&mut self, tool: T) {
        let schema = tool.schema();
        self.tools.insert(schema.name.clone(), Arc::new(tool));
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool<D>>> {
        self.tools.get(name).cloned()
    }

    /// Execute a tool call against the run's dependencies
    pub async fn execute(&self, deps: &mut D, call: &ToolCall) -> Result<ToolResult> {
        let tool = self.get(&call.name).ok_or_else(|| {
            AgentError::ToolNotFound(call.name.clone())
        })?;

        // Validate first
        tool.validate(call)?;

        // Execute
        tool.execute(deps, call).await
    }

    /// Get all tool schemas, sorted by name
    pub fn schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<_> = self.tools.values().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Get tool names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Generate system prompt section describing available tools
    pub fn generate_prompt_section(&self) -> String {
        let mut prompt = String::from("## Available Tools\n\n");
        prompt.push_str("You can use the following tools by responding with a JSON block:\n\n");
        prompt.push_str("```tool\n");
        prompt.push_str("{\"tool\": \"tool_name\", \"arguments\": {\"arg\": \"value\"}}\n");
        prompt.push_str("```\n\n");
        prompt.push_str("Call one tool per response and wait for its result.\n\n");

        for schema in self.schemas() {
            prompt.push_str(&format!("### {}\n", schema.name));
            prompt.push_str(&format!("{}\n", schema.description));

            if !schema.parameters.is_empty() {
                prompt.push_str("**Parameters:**\n");
                for param in &schema.parameters {
                    let required = if param.required { " (required)" } else { "" };
                    prompt.push_str(&format!(
                        "- `{}` ({}){}: {}",
                        param.name, param.param_type, required, param.description
                    ));
                    if let Some(values) = &param.enum_values {
                        let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                        prompt.push_str(&format!(" One of: {}.", values.join(", ")));
                    }
                    if let Some(default) = &param.default {
                        prompt.push_str(&format!(" Default: {}.", default));
                    }
                    prompt.push('\n');
                }
            }
            prompt.push('\n');
        }

        prompt
    }
}

// ============================================================================
// Built-in Tools
// ============================================================================

/// Current date tool - returns the local wall-clock time
pub struct CurrentDateTool;

/// Format used by [`CurrentDateTool`]
pub const CURRENT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[async_trait]
impl<D: Send + 'static> Tool<D> for CurrentDateTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_current_date".into(),
            description: "Get today's date and the current local time (YYYY-MM-DD HH:MM:SS)".into(),
            parameters: Vec::new(),
            category: Some("time".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, _deps: &mut D, _call: &ToolCall) -> Result<ToolResult> {
        tracing::debug!("Getting current date");
        let now = chrono::Local::now().format(CURRENT_DATE_FORMAT).to_string();
        Ok(ToolResult::success("get_current_date", now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts calls in the run's dependencies
    struct CountTool;

    #[async_trait]
    impl Tool<u32> for CountTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "count".into(),
                description: "Increment the counter".into(),
                parameters: vec![
                    ParameterSchema::optional("mode", "string", "Counting mode")
                        .with_enum(&["one", "two"]),
                ],
                category: None,
                has_side_effects: true,
            }
        }

        async fn execute(&self, deps: &mut u32, call: &ToolCall) -> Result<ToolResult> {
            let step = match call.opt_arg::<String>("mode")?.as_deref() {
                Some("two") => 2,
                _ => 1,
            };
            *deps += step;
            Ok(ToolResult::success("count", deps.to_string()))
        }
    }

    #[test]
    fn test_tool_registry() {
        let mut registry: ToolRegistry<u32> = ToolRegistry::new();
        registry.register(CurrentDateTool);
        registry.register(CountTool);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["count", "get_current_date"]);
        assert!(registry.get("unknown").is_none());
    }

    #[tokio::test]
    async fn test_execute_mutates_deps() {
        let mut registry: ToolRegistry<u32> = ToolRegistry::new();
        registry.register(CountTool);

        let mut counter = 0;
        registry.execute(&mut counter, &ToolCall::new("count")).await.unwrap();
        let call = ToolCall::new("count").with_arg("mode", serde_json::json!("two"));
        let result = registry.execute(&mut counter, &call).await.unwrap();

        assert_eq!(counter, 3);
        assert_eq!(result.output, "3");
    }

    #[tokio::test]
    async fn test_enum_validation() {
        let mut registry: ToolRegistry<u32> = ToolRegistry::new();
        registry.register(CountTool);

        let mut counter = 0;
        let call = ToolCall::new("count").with_arg("mode", serde_json::json!("three"));
        let err = registry.execute(&mut counter, &call).await.unwrap_err();
        assert!(matches!(err, AgentError::ToolValidation(_)));
        assert_eq!(counter, 0);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry: ToolRegistry<u32> = ToolRegistry::new();
        let err = registry.execute(&mut 0, &ToolCall::new("missing")).await.unwrap_err();
        assert!(matches!(err, AgentError::ToolNotFound(name) if name == "missing"));
    }

    #[tokio::test]
    async fn test_current_date_format() {
        let call = ToolCall::new("get_current_date");
        let result = Tool::<()>::execute(&CurrentDateTool, &mut (), &call).await.unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(&result.output, CURRENT_DATE_FORMAT).is_ok());
    }

    #[test]
    fn test_typed_args() {
        let call = ToolCall::new("add")
            .with_arg("proverbs", serde_json::json!(["a", "b"]))
            .with_arg("topic", serde_json::Value::Null);

        let proverbs: Vec<String> = call.arg("proverbs").unwrap();
        assert_eq!(proverbs, vec!["a", "b"]);
        assert!(call.opt_arg::<String>("topic").unwrap().is_none());
        assert!(matches!(call.arg::<f64>("lat"), Err(AgentError::ToolValidation(_))));
    }

    #[test]
    fn test_prompt_section_lists_enums() {
        let mut registry: ToolRegistry<u32> = ToolRegistry::new();
        registry.register(CountTool);
        let section = registry.generate_prompt_section();
        assert!(section.contains("### count"));
        assert!(section.contains("One of: \"one\", \"two\"."));
    }
}
