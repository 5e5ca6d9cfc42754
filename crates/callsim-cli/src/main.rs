use anyhow::Result;
use callsim_cli::{Cli, bootstrap, repl};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads the CALLSIM_* variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let ctx = bootstrap(&cli)?;
    repl::run(ctx).await
}
