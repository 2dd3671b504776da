//! rankbot binary.

use clap::Parser;
use rankbot::{BotEnv, BotSettings, Cli, ObservabilityConfig, commands_path, init_observability};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut observability = ObservabilityConfig::new().with_json_logs(cli.json_logs);
    if cli.verbose {
        observability = observability.with_log_level("debug");
    }
    init_observability(observability)?;

    let env = BotEnv::from_env()?;
    let settings = BotSettings::load(cli.config.as_deref())?;
    let commands = commands_path(cli.commands.as_deref(), &settings);

    if let Err(e) = rankbot::run(settings, env, &commands).await {
        tracing::error!(error = %e, "rankbot stopped");
        return Err(e.into());
    }
    Ok(())
}
