use clap::Parser;
use etl_studio::adapters::etl_registry::InMemoryEtlRegistry;
use etl_studio::adapters::query_store::InMemoryQueryStore;
use etl_studio::cli::Cli;
use etl_studio::config::Settings;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::new_with_cli(&cli)?;
    info!(
        "Starting ETL Studio on {} (config: {})",
        settings.bind_address(),
        cli.config.display()
    );
    info!("Serving Web UI from {}", settings.ui.dist_dir.display());

    let settings = Arc::new(settings);
    let queries = Arc::new(InMemoryQueryStore::new());
    let registry = Arc::new(InMemoryEtlRegistry::new());

    // Create application using the library function
    let app = etl_studio::create_app(settings.clone(), queries, registry)?;

    // Start server
    let addr: SocketAddr = settings.bind_address().parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
