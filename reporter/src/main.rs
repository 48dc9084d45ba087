//! Inventory Dashboard report CLI
//!
//! Logs go to stderr so stdout carries only the report.

use invdash_report::{emit, run, Config, DEFAULT_LOG_FILTER};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Building inventory dashboard report");
    tracing::info!("Environment: {}", config.environment);

    let result = match run(&config).await {
        Ok(report) => emit(&report, &config.output),
        Err(err) => Err(err),
    };

    if let Err(err) = &result {
        tracing::error!(code = err.code(), "Report failed: {}", err);
    }

    result?;
    Ok(())
}
