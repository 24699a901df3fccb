//! # agent-runtime
//!
//! Runtime providers for the agent system.
//!
//! ## Providers
//!
//! - **Ollama** (default): Local LLM inference via Ollama
//! - **OpenAI**: any OpenAI-compatible `/chat/completions` endpoint
//!
//! ## Usage
//!
//! ```rust,ignore
//! let selected = agent_runtime::provider_from_env(reqwest::Client::new())?;
//! let agent = AgentBuilder::new()
//!     .provider(selected.provider)
//!     .model(selected.model)
//!     .build()?;
//! ```

use std::sync::Arc;

#[cfg(feature = "ollama")]
pub mod ollama;
pub mod openai;

#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaProvider};
pub use openai::{OpenAiConfig, OpenAiProvider};

// Re-export core types for convenience
pub use agent_core::{
    Agent, AgentError, LlmProvider, Message, Result, Role, Tool, ToolRegistry,
};

/// A provider together with the model it should be driven with
pub struct SelectedProvider {
    pub name: &'static str,
    pub provider: Arc<dyn LlmProvider>,
    pub model: String,
}

/// Pick the LLM backend named by `LLM_PROVIDER` (default: `ollama`)
pub fn provider_from_env(client: reqwest::Client) -> Result<SelectedProvider> {
    provider_from_lookup(client, |key| std::env::var(key).ok())
}

/// Same as [`provider_from_env`] with an arbitrary variable source
pub fn provider_from_lookup(
    client: reqwest::Client,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SelectedProvider> {
    let kind = lookup("LLM_PROVIDER").unwrap_or_else(|| "ollama".into());

    match kind.to_ascii_lowercase().as_str() {
        #[cfg(feature = "ollama")]
        "ollama" => {
            let config = OllamaConfig::from_lookup(&lookup);
            Ok(SelectedProvider {
                name: "Ollama",
                model: config.model.clone(),
                provider: Arc::new(OllamaProvider::from_config(config)),
            })
        }
        "openai" => {
            let config = OpenAiConfig::from_lookup(&lookup)?;
            Ok(SelectedProvider {
                name: "OpenAI",
                model: config.model.clone(),
                provider: Arc::new(OpenAiProvider::new(client, config)),
            })
        }
        other => Err(AgentError::Config(format!("Unknown LLM_PROVIDER: {other}"))),
    }
}
