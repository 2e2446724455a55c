use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use resolveit_cli::config::CliConfig;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resolveit_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // --- Configuration ---
    let config = CliConfig::from_env().context("Invalid configuration")?;
    tracing::info!(
        input = ?config.input,
        role = %config.role,
        now = ?config.now,
        "Loaded evaluator configuration"
    );

    resolveit_cli::run(&config, std::io::stdin().lock(), std::io::stdout().lock())?;
    Ok(())
}
