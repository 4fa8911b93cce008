//! Plain data: orders as received and metrics as produced.

pub mod metrics;
pub mod order;

pub use metrics::*;
pub use order::*;
