//! # Dashboard Messages
//!
//! Requests sent from [`DashboardClient`](crate::clients::DashboardClient) to
//! [`DashboardActor`](super::DashboardActor). Each carries a one-shot channel
//! for the reply.

use super::state::{ControllerStats, LifecycleState, RefreshOutcome};
use tokio::sync::oneshot;

/// Type alias for the one-shot reply channel.
pub type Response<T> = oneshot::Sender<T>;

#[derive(Debug)]
pub enum DashboardRequest {
    /// Start a fetch (initial load or operator retry).
    Refresh { respond_to: Response<RefreshOutcome> },
    /// Read the current lifecycle state.
    GetState { respond_to: Response<LifecycleState> },
    /// Read the actor's counters.
    GetStats { respond_to: Response<ControllerStats> },
}
