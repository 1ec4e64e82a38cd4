// ============================
// crates/backend-bin/src/main.rs
// ============================
//! roomfeed server binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use roomfeed_backend_lib::{config::Settings, http_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "roomfeed", about = "Minimal multi-room chat broadcaster")]
struct Args {
    /// Path to a TOML config file (default: roomfeed.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured bind address
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    if let Some(bind) = args.bind {
        settings.bind_addr = bind;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let bind_addr = settings.bind_addr;
    let state = AppState::new(settings);
    let app = http_router::create_router(state);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %bind_addr, "roomfeed listening");

    axum::serve(listener, app).await?;
    Ok(())
}
