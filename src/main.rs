//! # Order Dashboard
//!
//! Loads configuration, starts the [`DashboardSystem`], performs the initial
//! refresh and prints the resulting [`DashboardView`](order_dashboard::view::DashboardView)
//! as JSON.
//!
//! Usage: `order-dashboard [CONFIG.toml]`

use order_dashboard::config::DashboardConfig;
use order_dashboard::lifecycle::{setup_tracing, DashboardSystem};
use std::path::PathBuf;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = DashboardConfig::load(config_path.as_deref())?;
    info!(
        endpoint = %config.fetch.endpoint,
        profit_margin = config.metrics.profit_margin,
        growth_rate = config.metrics.growth_rate,
        "Starting order dashboard"
    );

    let system = DashboardSystem::with_http(&config)?;

    let span = tracing::info_span!("initial_load");
    let result = async { system.dashboard_client.load().await }
        .instrument(span)
        .await;

    match result {
        Ok(metrics) => info!(
            total_orders = metrics.total_orders,
            delivered_orders = metrics.delivered_orders,
            completion_rate = metrics.completion_rate,
            total_revenue = metrics.total_revenue,
            "Dashboard ready"
        ),
        Err(e) => error!(error = %e, "Initial load failed"),
    }

    let view = system.dashboard_client.view().await?;
    println!("{}", serde_json::to_string_pretty(&view)?);

    system.shutdown().await?;
    Ok(())
}
