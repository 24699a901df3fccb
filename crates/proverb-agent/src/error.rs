//! Error Types for the Proverb Agent

use agent_core::AgentError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProverbError>;

#[derive(Error, Debug)]
pub enum ProverbError {
    /// The geocoder answered but matched nothing; the model may rephrase
    #[error("Could not find the location")]
    LocationNotFound,

    /// Connection failure or non-success HTTP status
    #[error("Provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider response did not have the expected shape
    #[error("Unexpected provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ProverbError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProverbError::LocationNotFound)
    }
}

impl From<ProverbError> for AgentError {
    fn from(err: ProverbError) -> Self {
        if err.is_retryable() {
            AgentError::ToolRetry(err.to_string())
        } else {
            AgentError::ToolExecution(err.to_string())
        }
    }
}
