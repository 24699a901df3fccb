//! # agent-core
//!
//! Core agent logic with provider-agnostic LLM abstraction and extensible tool system.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Agent<D>                              │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │  Reasoning  │  │    Tools    │  │   LlmProvider       │  │
//! │  │    Loop     │──│ Registry<D> │──│   (Strategy)        │  │
//! │  └──────┬──────┘  └──────┬──────┘  └─────────────────────┘  │
//! │         │ AgentEvent     │ &mut D (per-run state)           │
//! └─────────┼────────────────┼──────────────────────────────────┘
//!           ▼                ▼
//!       EventSink       caller-owned deps
//! ```
//!
//! The `LlmProvider` trait enables swapping between Ollama, OpenAI-compatible
//! endpoints, or any other provider without changing agent logic. Tools are
//! shared across runs; the state they act on (`D`) is owned by a single run.

pub mod provider;
pub mod tool;
pub mod reasoning;
pub mod message;
pub mod error;
pub mod event;

pub use error::{AgentError, Result};
pub use event::{AgentEvent, EventSink};
pub use message::{Conversation, Message, Role};
pub use provider::LlmProvider;
pub use reasoning::{Agent, AgentBuilder, AgentConfig};
pub use tool::{Tool, ToolCall, ToolResult, ToolRegistry, ToolSchema};
