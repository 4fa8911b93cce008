//! # Dashboard Actor
//!
//! The lifecycle controller: it decides when a fetch runs, feeds successful
//! snapshots to the aggregator and keeps failures for display.
//!
//! ## Structure
//!
//! - [`actor`] - [`DashboardActor`], the event loop that owns all state
//! - [`message`] - [`DashboardRequest`] sent by the client
//! - [`state`] - [`LifecycleState`], [`RefreshOutcome`], [`ControllerStats`]
//! - [`error`] - [`DashboardError`] for client-side failures
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use order_dashboard::config::ControllerConfig;
//! use order_dashboard::dashboard_actor;
//! use order_dashboard::fetcher::mock::MockFetcher;
//! use order_dashboard::model::{MetricsConfig, OrderRecord, OrderSnapshot};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = MockFetcher::new();
//!     fetcher.expect_fetch().return_ok(OrderSnapshot::new(vec![
//!         OrderRecord::new("Delivered", Some(500.0)),
//!         OrderRecord::new("Pending", Some(300.0)),
//!     ]));
//!
//!     let (actor, client) = dashboard_actor::new(ControllerConfig::default(), MetricsConfig::default());
//!     tokio::spawn(actor.run(Arc::new(fetcher)));
//!
//!     let metrics = client.load().await?;
//!     assert_eq!(metrics.completion_rate, 50);
//!     Ok(())
//! }
//! ```
//!
//! ## Error handling
//!
//! Fetch errors never escape the actor as `Err`: they become the `Failed`
//! state, with the operator deciding when to retry. Only
//! [`DashboardClient::load`](crate::clients::DashboardClient::load) turns a
//! `Failed` outcome back into an error, for callers that want one value.

pub mod actor;
pub mod error;
pub mod message;
pub mod state;

pub use actor::*;
pub use error::*;
pub use message::*;
pub use state::*;

use crate::clients::DashboardClient;
use crate::config::ControllerConfig;
use crate::model::MetricsConfig;

/// Creates a new dashboard actor and its client.
pub fn new(controller: ControllerConfig, metrics: MetricsConfig) -> (DashboardActor, DashboardClient) {
    DashboardActor::new(controller, metrics)
}
