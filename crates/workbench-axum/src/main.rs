//! `qwenworkbench` - QwenWorkbench orchestration API server.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use workbench_axum::{Cli, start_server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    start_server(cli.into_server_config()?).await
}
