//! Type-safe client for the dashboard actor.

pub mod dashboard_client;

pub use dashboard_client::*;
