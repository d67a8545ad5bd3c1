use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use roll_server::cli::Cli;

mod bootstrap;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "ROLLCALL_LOG";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("rollcalld error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level())?;

    let config = bootstrap::load_config(&cli)?;
    let state = bootstrap::build_state(&config).await?;
    let pool = state.service.pool().clone();

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "rollcalld listening");

    roll_server::serve(listener, state, shutdown_signal())
        .await
        .context("server error")?;

    pool.close();
    tracing::info!("rollcalld stopped");
    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
