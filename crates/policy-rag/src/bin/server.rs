//! Question-answering server binary
//!
//! Run with: cargo run -p policy-rag --bin policy-rag-server

use policy_rag::{config::Config, server::QaServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials may live in a local .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "policy_rag=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; missing credentials fail here, at startup
    let config = Config::from_env()?;

    tracing::info!("configuration loaded");
    tracing::info!("  - generation model: {}", config.llm.model);
    tracing::info!("  - embedding model: {}", config.embeddings.model);
    tracing::info!(
        "  - chunk size: {} (overlap {})",
        config.chunking.chunk_size,
        config.chunking.chunk_overlap
    );
    tracing::info!("  - top-k: {}", config.retrieval.top_k);

    let server = QaServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/run  - Answer questions about a document");
    println!("  GET  /api/info - API description");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
