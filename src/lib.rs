//! # Order Dashboard
//!
//! The core of an administrative order dashboard: fetch the current order list,
//! derive a handful of summary metrics and proportion charts, and manage the
//! refresh and error lifecycle around that.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Data ([`model`])
//! Orders as received ([`OrderRecord`](model::OrderRecord), [`OrderSnapshot`](model::OrderSnapshot))
//! and metrics as produced ([`MetricsBundle`](model::MetricsBundle), [`ChartProportion`](model::ChartProportion)).
//!
//! ### 2. The Calculation ([`aggregator`])
//! A pure function from a snapshot to a bundle. No I/O, no state.
//!
//! ### 3. The Source ([`fetcher`])
//! The [`OrderFetcher`](fetcher::OrderFetcher) trait, its HTTP implementation and a
//! scriptable mock.
//!
//! ### 4. The Controller ([`dashboard_actor`], [`clients`])
//! An actor that owns the lifecycle state (`Idle`, `Loading`, `Ready`, `Failed`)
//! and tags every fetch with a generation so late results from superseded
//! refreshes are dropped. [`DashboardClient`](clients::DashboardClient) is its async API.
//!
//! ### 5. The Output ([`view`])
//! [`DashboardView`](view::DashboardView), the only data handed to presentation.
//!
//! ### 6. The Wiring ([`config`], [`lifecycle`])
//! TOML configuration with environment overrides, system startup and shutdown,
//! and tracing setup.
//!
//! ## ⚠️ Stub Metrics
//!
//! `profit_margin` and `growth_rate` are configured constants, not derived from
//! orders. They are displayed like the computed metrics until a cost model and
//! historical data exist.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -- dashboard.toml
//! DASHBOARD_ENDPOINT=http://localhost:9000/orders cargo run
//! ```

pub mod aggregator;
pub mod clients;
pub mod config;
pub mod dashboard_actor;
pub mod fetcher;
pub mod lifecycle;
pub mod model;
pub mod view;
