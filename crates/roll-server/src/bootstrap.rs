use anyhow::Context;

use roll_config::RollConfig;
use roll_db::RollService;
use roll_server::AppState;
use roll_server::cli::Cli;

/// Load `.env`, the layered config, then apply CLI overrides.
pub fn load_config(cli: &Cli) -> anyhow::Result<RollConfig> {
    let mut config = RollConfig::load_with_dotenv(cli.config.as_deref())
        .context("failed to load rollcall configuration")?;

    if let Some(host) = &cli.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    Ok(config)
}

/// Open the database pool and build handler state.
pub async fn build_state(config: &RollConfig) -> anyhow::Result<AppState> {
    let service = RollService::open(config)
        .await
        .context("failed to open database")?;
    AppState::new(service, config).context("failed to build lookup client")
}
