//! Genolens — cancer genomics data tools served over HTTP.
//! Entry point for the agent binary.

mod config;
mod server;
mod tools;

use genolens_sources::FirebrowseClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("genolens=debug,info")),
        )
        .init();

    info!("🧬 Genolens starting up...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match config::Config::load() {
        Ok(c) => {
            info!(
                "Configuration loaded. Firebrowse page size: {}, max pages: {}",
                c.firebrowse.page_size, c.firebrowse.max_pages
            );
            c
        }
        Err(e) => {
            tracing::warn!("Could not load genolens.toml: {e}");
            tracing::warn!("Copy genolens.example.toml to genolens.toml and edit it.");
            return Ok(());
        }
    };

    if config.tavily.api_key.is_empty() {
        tracing::warn!("Tavily API key not set (tavily.api_key); web search client unavailable.");
    }

    // Build the Firebrowse client and register the expression tool
    let firebrowse = FirebrowseClient::new()
        .with_base_url(config.firebrowse.base_url.clone())
        .with_page_size(config.firebrowse.page_size)
        .with_max_pages(config.firebrowse.max_pages);

    let registry = std::sync::Arc::new(tools::build_default_registry(firebrowse));
    info!("✅ Tool registry ready: {} tools registered.", registry.len());

    let router = server::build_router(registry);

    // Start the tool server
    let bind_addr =
        std::env::var("GENOLENS_BIND").unwrap_or_else(|_| config.server.bind.clone());

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("🌐 Tool server listening on http://{}", bind_addr);
    info!("   Manifest: GET  /tools");
    info!("   Invoke:   POST /tools/get_gene_specific_expression_in_cancer_type");
    info!("");
    info!("🧬 Genolens ready. Press Ctrl+C to stop.");

    axum::serve(listener, router).await?;

    Ok(())
}
