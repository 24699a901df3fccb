//! Application State

use std::sync::Arc;

use agent_core::Agent;
use proverb_agent::{ProverbState, Providers};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Agent with its LLM provider and tool registry
    pub agent: Arc<Agent<ProverbState>>,

    /// Live or fallback provider clients, copied into every run's state
    pub providers: Providers,
}

impl AppState {
    pub fn new(agent: Agent<ProverbState>, providers: Providers) -> Self {
        Self {
            agent: Arc::new(agent),
            providers,
        }
    }

    /// Fresh per-run state
    pub fn session(&self) -> ProverbState {
        ProverbState::new(self.providers.clone())
    }
}
