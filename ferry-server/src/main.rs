mod endpoints;
mod router;

use anyhow::Result;
use clap::Parser;
use ferry::{AdminService, DataService, DictionaryEditor, EngineClient, GatewayConfig};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "ferry-server")]
#[command(about = "HTTP gateway for an Elasticsearch-compatible search engine")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "ferry.toml")]
    config: String,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "3090")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,ferry=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    tracing::info!("Starting ferry server on {}:{}", args.host, args.port);
    tracing::info!("Config file: {}", args.config);

    let config = GatewayConfig::load_or_create(std::path::Path::new(&args.config))?;
    tracing::info!("Engine at {}", config.engine.base_url);

    let transport: Arc<dyn ferry::EngineTransport> = Arc::new(EngineClient::new(&config.engine)?);

    let state = router::AppState {
        data: Arc::new(DataService::new(transport.clone(), &config)),
        admin: Arc::new(AdminService::new(transport, &config)),
        dictionary: Arc::new(DictionaryEditor::new(&config.dictionary)),
        default_index: config.engine.index.clone(),
        default_type: config.engine.type_name.clone(),
    };

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router::build_router(state)).await?;

    Ok(())
}
