//! # System Lifecycle & Orchestration
//!
//! Starts the dashboard actor, wires the order fetcher into it and shuts it
//! down again.
//!
//! ## Dependency Injection via Context
//!
//! The actor is created without its fetcher and receives it in `run`:
//!
//! ```rust,ignore
//! let (actor, client) = dashboard_actor::new(config.controller, config.metrics);
//! let handle = tokio::spawn(actor.run(Arc::new(fetcher)));
//! ```
//!
//! This keeps the fetcher swappable: [`HttpOrderFetcher`](crate::fetcher::HttpOrderFetcher)
//! in production, [`MockFetcher`](crate::fetcher::mock::MockFetcher) in tests.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the request channel
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`
//! 3. **Actor cleans up** - aborts fetches still in flight, logs its counters
//! 4. **Await completion** - [`DashboardSystem::shutdown`] joins the actor task
//!
//! ## Observability & Tracing
//!
//! See the [`tracing`] module.

pub mod dashboard_system;
pub mod tracing;

pub use dashboard_system::*;
pub use self::tracing::*;
