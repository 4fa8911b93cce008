//! Error types for talking to the dashboard actor.

use crate::fetcher::FetchError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DashboardError {
    /// The actor has stopped and no longer accepts requests.
    #[error("Actor closed")]
    ActorClosed,

    /// The actor dropped the reply channel without answering.
    #[error("Actor dropped response channel")]
    ActorDropped,

    /// The refresh settled in the `Failed` state.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
