//! Inventory Dashboard report
//!
//! Reads saved product and inventory list snapshots, computes the landing
//! page statistics and emits them as JSON or a CSV product table.

pub mod config;
pub mod error;
pub mod report;
pub mod snapshot;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use report::{emit, DashboardReport, ProductRow};

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "invdash_report=debug";

/// Load both snapshots and build the dashboard report
pub async fn run(config: &Config) -> AppResult<DashboardReport> {
    let (products, transactions) = snapshot::load_all(&config.snapshot).await?;
    Ok(DashboardReport::build(
        &config.environment,
        &products,
        &transactions,
        &config.stock.policy(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_filter() {
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
        assert_eq!(DEFAULT_LOG_FILTER, "invdash_report=debug");
    }
}
