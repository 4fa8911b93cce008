//! Lifecycle state owned by the dashboard actor.

use crate::fetcher::FetchError;
use crate::model::MetricsBundle;

/// Identifies one refresh. Issued in strictly increasing order.
pub type Generation = u64;

/// Where the dashboard is in its refresh cycle.
///
/// One variant instead of separate loading/error/data flags, so states such as
/// "loading with an error" cannot be represented.
///
/// ```text
/// Idle ──refresh──> Loading ──ok──> Ready
///                      │  ^            │
///                    error └──refresh──┤
///                      v               │
///                   Failed ──refresh───┘
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LifecycleState {
    /// No refresh has been requested yet.
    #[default]
    Idle,
    /// A fetch for `generation` is in flight.
    Loading { generation: Generation },
    /// The snapshot fetched by `generation` has been aggregated.
    Ready {
        generation: Generation,
        metrics: MetricsBundle,
    },
    /// The fetch for `generation` failed. `stale` holds the last good bundle
    /// when the controller is configured to keep it.
    Failed {
        generation: Generation,
        error: FetchError,
        stale: Option<MetricsBundle>,
    },
}

impl LifecycleState {
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleState::Idle => "idle",
            LifecycleState::Loading { .. } => "loading",
            LifecycleState::Ready { .. } => "ready",
            LifecycleState::Failed { .. } => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LifecycleState::Loading { .. })
    }

    pub fn generation(&self) -> Option<Generation> {
        match self {
            LifecycleState::Idle => None,
            LifecycleState::Loading { generation }
            | LifecycleState::Ready { generation, .. }
            | LifecycleState::Failed { generation, .. } => Some(*generation),
        }
    }

    /// Fresh metrics, only present in `Ready`.
    pub fn metrics(&self) -> Option<&MetricsBundle> {
        match self {
            LifecycleState::Ready { metrics, .. } => Some(metrics),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            LifecycleState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Result of a refresh request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A fetch was started for this generation.
    Started(Generation),
    /// A fetch was already in flight and the policy says to wait for it.
    Ignored { in_flight: Generation },
}

impl RefreshOutcome {
    /// The generation whose result the dashboard is now waiting for.
    pub fn generation(&self) -> Generation {
        match self {
            RefreshOutcome::Started(generation) => *generation,
            RefreshOutcome::Ignored { in_flight } => *in_flight,
        }
    }
}

/// Counters kept by the actor since it started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerStats {
    /// Fetches started.
    pub issued: u64,
    /// Results applied to the state.
    pub accepted: u64,
    /// Results that arrived after a newer refresh and were dropped.
    pub discarded: u64,
    /// Fetches aborted because a newer refresh superseded them.
    pub cancelled: u64,
    /// Refresh requests dropped under `IgnoreWhileLoading`.
    pub ignored: u64,
}
