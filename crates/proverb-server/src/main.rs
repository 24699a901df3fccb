//! Proverb agent HTTP server
//!
//! Wires configuration, the LLM provider, provider clients and the tool
//! registry together, then serves the AG-UI endpoint until Ctrl-C.

use agent_core::AgentBuilder;
use proverb_agent::{toolkit, ProviderConfig, Providers, PROVERB_AGENT_PROMPT};
use proverb_server::{app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment before reading RUST_LOG
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // One HTTP client shared by every outbound call
    let client = reqwest::Client::new();

    let selected = agent_runtime::provider_from_env(client.clone())?;
    match selected.provider.health_check().await {
        Ok(true) => {
            tracing::info!(
                provider = selected.name,
                model = %selected.model,
                "✓ LLM provider reachable"
            );
            if let Ok(models) = selected.provider.list_models().await {
                for model in models {
                    tracing::info!("  Model: {}", model.id);
                }
            }
        }
        Ok(false) | Err(_) => {
            tracing::warn!(
                provider = selected.name,
                "⚠ LLM provider not reachable - runs will fail until it is"
            );
        }
    }

    let providers = Providers::from_config(&ProviderConfig::from_env(), &client);

    let tools = toolkit();
    tracing::info!("Registered {} tools:", tools.len());
    for name in tools.names() {
        tracing::info!("  • {}", name);
    }

    let agent = AgentBuilder::new()
        .provider(selected.provider)
        .model(selected.model)
        .system_prompt(PROVERB_AGENT_PROMPT)
        .tools(tools)
        .build()?;

    let app = app(AppState::new(agent, providers));

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 proverb agent listening on http://{}", addr);
    tracing::info!("  POST /        - AG-UI agent run (SSE)");
    tracing::info!("  GET  /health  - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
