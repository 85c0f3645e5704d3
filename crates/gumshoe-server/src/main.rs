use anyhow::Result;
use clap::Parser;
use gumshoe_core::storage::CaseStore;
use gumshoe_server::api::{self, AppState};
use gumshoe_server::config::ServerConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding one <case_id>.db SQLite file per case.
    #[arg(long)]
    cases_dir: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:8000.
    #[arg(long)]
    listen: Option<String>,
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut cfg = ServerConfig::from_env();
    if let Some(dir) = args.cases_dir {
        cfg.cases_dir = dir;
    }
    if let Some(listen) = args.listen {
        cfg.listen_addr = listen;
    }

    init_logging(&cfg.log_level);

    tracing::info!(
        event = "server_start",
        cases_dir = %cfg.cases_dir.display(),
        listen = %cfg.listen_addr,
        time_limit_ms = cfg.time_limit_ms,
    );

    let state = AppState {
        store: Arc::new(CaseStore::new(cfg.cases_dir.clone())),
        time_limit: cfg.time_limit(),
    };
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
