use std::path::PathBuf;
use std::sync::Arc;

use backend_lib::{config::Settings, routes, store::FlatFileStore, AppState};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Gatekeeper credential-management server
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to a TOML config file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let settings = Settings::load_from(&args.config)?;

    // RUST_LOG wins over the configured level when set
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone())),
        )
        .init();

    let store = FlatFileStore::new(&settings.data_dir)?;
    let bind_addr = settings.bind_addr;

    let state = Arc::new(AppState::new(store, settings));
    let app = routes::create_router(state);

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
