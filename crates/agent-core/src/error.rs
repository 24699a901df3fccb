//! Error Types

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM provider error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Tool not found in registry
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool validation failed
    #[error("Tool validation error: {0}")]
    ToolValidation(String),

    /// Tool execution failed
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// Tool asked the model to reformulate the call and try again
    #[error("Tool requested a retry: {0}")]
    ToolRetry(String),

    /// The model kept producing calls a tool rejected
    #[error("Tool '{tool}' exceeded max retries ({max})")]
    ToolRetriesExceeded { tool: String, max: usize },

    /// Maximum iterations reached in reasoning loop
    #[error("Maximum iterations ({0}) reached")]
    MaxIterations(usize),

    /// Parse error (e.g., tool call parsing)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limited
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl AgentError {
    /// Errors the model can fix by issuing a different tool call.
    ///
    /// These are fed back into the conversation instead of aborting the run.
    pub fn is_model_recoverable(&self) -> bool {
        matches!(
            self,
            AgentError::ToolRetry(_)
                | AgentError::ToolNotFound(_)
                | AgentError::ToolValidation(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AgentError::Provider(msg) => format!("The AI service encountered an error: {}", msg),
            AgentError::ProviderUnavailable(_) => {
                "The AI service is currently unavailable. Please try again.".into()
            }
            AgentError::ToolNotFound(name) => format!("The tool '{}' is not available.", name),
            AgentError::ToolValidation(msg) => format!("Invalid tool input: {}", msg),
            AgentError::ToolExecution(msg) => format!("Tool error: {}", msg),
            AgentError::ToolRetry(msg) => msg.clone(),
            AgentError::ToolRetriesExceeded { tool, .. } => {
                format!("The tool '{}' could not complete the request.", tool)
            }
            AgentError::MaxIterations(_) => {
                "The request took too long to process. Please try a simpler query.".into()
            }
            AgentError::RateLimited(_) => {
                "You've made too many requests. Please wait a moment.".into()
            }
            AgentError::Auth(_) => "Authentication failed. Please check your credentials.".into(),
            _ => "An unexpected error occurred.".into(),
        }
    }

    /// Stable machine-readable code, used in protocol error events
    pub fn code(&self) -> &'static str {
        match self {
            AgentError::Provider(_) | AgentError::ProviderUnavailable(_) => "PROVIDER_ERROR",
            AgentError::ToolNotFound(_) | AgentError::ToolValidation(_) => "TOOL_INPUT_ERROR",
            AgentError::ToolExecution(_) => "TOOL_ERROR",
            AgentError::ToolRetry(_) | AgentError::ToolRetriesExceeded { .. } => {
                "TOOL_RETRIES_EXCEEDED"
            }
            AgentError::MaxIterations(_) => "MAX_ITERATIONS",
            AgentError::RateLimited(_) => "RATE_LIMITED",
            AgentError::Auth(_) => "AUTH_ERROR",
            _ => "AGENT_ERROR",
        }
    }
}

impl From<anyhow::Error> for AgentError {
    fn from(err: anyhow::Error) -> Self {
        AgentError::Other(err.to_string())
    }
}
