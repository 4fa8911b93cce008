//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber` formatter filtered
//! by `RUST_LOG`, falling back to `info` when the variable is unset.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup, shutdown and final counters
//! - **State Transitions**: `from`, `to` and `generation` on every change
//! - **Fetches**: endpoint, order count, HTTP status on failure
//! - **Stale Results**: generation of the discarded result and the latest one
//!
//! ## Usage Examples
//!
//! ```bash
//! RUST_LOG=info cargo run                           # transitions and fetch results
//! RUST_LOG=debug cargo run                          # every request to the actor
//! RUST_LOG=order_dashboard::fetcher=debug cargo run # HTTP side only
//! ```
//!
//! A refresh that fails and is then retried looks like this at `info`:
//!
//! ```text
//! INFO refresh: Refresh requested outcome=Started(1)
//! INFO State changed from="idle" to="loading" generation=Some(1)
//! WARN fetch: Orders service returned an error status status=500 Internal Server Error
//! WARN Refresh failed generation=1 error=Transport failure: orders service returned HTTP 500 Internal Server Error
//! INFO State changed from="loading" to="failed" generation=Some(1)
//! INFO retry:refresh: Refresh requested outcome=Started(2)
//! INFO State changed from="failed" to="loading" generation=Some(2)
//! INFO fetch: Fetched orders orders=3
//! INFO Metrics updated generation=2 total_orders=3 completion_rate=67
//! INFO State changed from="loading" to="ready" generation=Some(2)
//! ```
use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
