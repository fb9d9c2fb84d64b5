//! Evidence RAG server binary
//!
//! Run with: cargo run -p evidence-rag --bin evidence-rag-server

use evidence_rag::{config::RagConfig, server::RagServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evidence_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = RagConfig::load()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Knowledge graph: {} (db {})", config.graph.uri, config.graph.database);
    tracing::info!("  - Embedding model: {}", config.llm.embed_model);
    tracing::info!("  - LLM model: {}", config.llm.generate_model);
    tracing::info!(
        "  - Default strategy: {}",
        config
            .retrieval
            .default_strategy
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unset".to_string())
    );
    tracing::info!("  - Conversations: {:?}", config.conversations.backend);

    // Create and start server
    let server = RagServer::new(config).await?;

    if !server.state().is_ready() {
        tracing::warn!(
            "Serving in degraded mode: {}",
            server.state().degraded_reason().unwrap_or("unknown")
        );
    }

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  API Info: http://{}/api/info", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/queries/query - Ask questions (raw sources)");
    println!("  POST /api/rag/query     - Ask questions (snippets)");
    println!("  POST /api/ui/query      - Ask questions (sources panel)");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
