//! # Dashboard Client
//!
//! Provides a high‑level API for interacting with the dashboard actor.
//! It hides the request channel and the state subscription behind async methods.
use crate::dashboard_actor::{
    ControllerStats, DashboardError, DashboardRequest, LifecycleState, RefreshOutcome,
};
use crate::model::MetricsBundle;
use crate::view::DashboardView;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, instrument};

/// Client for interacting with the dashboard actor.
///
/// Cheap to clone; every clone talks to the same actor. The actor stops once
/// all clients are dropped.
#[derive(Clone)]
pub struct DashboardClient {
    sender: mpsc::Sender<DashboardRequest>,
    state: watch::Receiver<LifecycleState>,
}

impl DashboardClient {
    pub fn new(
        sender: mpsc::Sender<DashboardRequest>,
        state: watch::Receiver<LifecycleState>,
    ) -> Self {
        Self { sender, state }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> DashboardRequest,
    ) -> Result<T, DashboardError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| DashboardError::ActorClosed)?;
        response.await.map_err(|_| DashboardError::ActorDropped)
    }

    /// Starts a fetch. Returns as soon as the actor has moved to `Loading`.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<RefreshOutcome, DashboardError> {
        debug!("Sending request");
        let outcome = self
            .request(|respond_to| DashboardRequest::Refresh { respond_to })
            .await?;
        info!(?outcome, "Refresh requested");
        Ok(outcome)
    }

    /// Operator-initiated retry after a failure. Same as [`refresh`](Self::refresh).
    #[instrument(skip(self))]
    pub async fn retry(&self) -> Result<RefreshOutcome, DashboardError> {
        self.refresh().await
    }

    /// The state as of every request sent before this one.
    #[instrument(skip(self))]
    pub async fn state(&self) -> Result<LifecycleState, DashboardError> {
        debug!("Sending request");
        self.request(|respond_to| DashboardRequest::GetState { respond_to })
            .await
    }

    pub async fn stats(&self) -> Result<ControllerStats, DashboardError> {
        self.request(|respond_to| DashboardRequest::GetStats { respond_to })
            .await
    }

    /// The current state rendered for the presentation layer.
    pub async fn view(&self) -> Result<DashboardView, DashboardError> {
        let state = self.state().await?;
        Ok(DashboardView::from(&state))
    }

    /// A receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state.clone()
    }

    /// Waits until no fetch is in flight and returns the settled state.
    ///
    /// Returns immediately when the dashboard is `Idle`, `Ready` or `Failed`.
    #[instrument(skip(self))]
    pub async fn wait_until_settled(&self) -> Result<LifecycleState, DashboardError> {
        let mut state = self.state.clone();
        let settled = state
            .wait_for(|s| !s.is_loading())
            .await
            .map_err(|_| DashboardError::ActorClosed)?;
        Ok(settled.clone())
    }

    /// Refreshes and waits for the outcome.
    ///
    /// A `Failed` outcome becomes [`DashboardError::Fetch`].
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<MetricsBundle, DashboardError> {
        self.refresh().await?;
        match self.wait_until_settled().await? {
            LifecycleState::Ready { metrics, .. } => Ok(metrics),
            LifecycleState::Failed { error, .. } => Err(DashboardError::Fetch(error)),
            // Unreachable after a refresh; the actor never returns to Idle.
            LifecycleState::Idle | LifecycleState::Loading { .. } => {
                Err(DashboardError::ActorDropped)
            }
        }
    }
}
