//! # Dashboard Actor
//!
//! The server half of the lifecycle controller. It owns the lifecycle state,
//! the generation counter and the last good bundle, and processes requests
//! sequentially, so none of that state needs a lock.
//!
//! ## Fetching without blocking the loop
//!
//! A refresh spawns the fetch into a [`JoinSet`] and returns immediately. The
//! loop waits on both the request channel and the join set, so state queries
//! are answered while a fetch is in flight.
//!
//! At most one fetch is outstanding. Under [`RefreshPolicy::Supersede`] a
//! refresh while loading aborts the running fetch before starting the next
//! one:
//!
//! ```text
//! refresh #1 ──fetch A──x (aborted)
//! refresh #2 ───────────└──fetch B──────┐
//!                                       v
//!          Loading(1) ──> Loading(2) ──> Ready(2, B)
//! ```
//!
//! A result is applied only if its generation is still the latest one issued.
//! That covers a fetch that finished before the abort reached it.
//!
//! A fetch task that panics settles its generation as a
//! [`FetchError::TransportFailure`], so the dashboard never stays loading.

use crate::aggregator::aggregate;
use crate::clients::DashboardClient;
use crate::config::{ControllerConfig, RefreshPolicy};
use crate::fetcher::{FetchError, OrderFetcher};
use crate::model::{MetricsBundle, MetricsConfig, OrderSnapshot};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::{self, JoinError, JoinSet};
use tracing::{debug, info, warn};

use super::message::DashboardRequest;
use super::state::{ControllerStats, Generation, LifecycleState, RefreshOutcome};

type FetchResult = Result<OrderSnapshot, FetchError>;

pub struct DashboardActor {
    receiver: mpsc::Receiver<DashboardRequest>,
    state: watch::Sender<LifecycleState>,
    in_flight: JoinSet<FetchResult>,
    generations: HashMap<task::Id, Generation>,
    latest: Generation,
    last_good: Option<MetricsBundle>,
    stats: ControllerStats,
    controller: ControllerConfig,
    metrics: MetricsConfig,
}

impl DashboardActor {
    /// Creates the actor and its client. The actor does nothing until [`run`](Self::run).
    pub fn new(controller: ControllerConfig, metrics: MetricsConfig) -> (Self, DashboardClient) {
        let (sender, receiver) = mpsc::channel(controller.buffer_size.max(1));
        let (state, state_rx) = watch::channel(LifecycleState::Idle);
        let actor = Self {
            receiver,
            state,
            in_flight: JoinSet::new(),
            generations: HashMap::new(),
            latest: 0,
            last_good: None,
            stats: ControllerStats::default(),
            controller,
            metrics,
        };
        (actor, DashboardClient::new(sender, state_rx))
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// The fetcher is injected here rather than in [`new`](Self::new), so the
    /// client can be handed out before the transport is built.
    pub async fn run(mut self, fetcher: Arc<dyn OrderFetcher>) {
        info!(policy = ?self.controller.refresh_policy, "Actor started");

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.handle_request(msg, &fetcher),
                    None => break,
                },
                Some(joined) = self.in_flight.join_next_with_id() => self.joined(joined),
            }
        }

        let abandoned = self.in_flight.len();
        self.in_flight.shutdown().await;
        info!(abandoned, stats = ?self.stats, "Shutdown");
    }

    fn handle_request(&mut self, msg: DashboardRequest, fetcher: &Arc<dyn OrderFetcher>) {
        match msg {
            DashboardRequest::Refresh { respond_to } => {
                let outcome = self.refresh(fetcher);
                let _ = respond_to.send(outcome);
            }
            DashboardRequest::GetState { respond_to } => {
                let state = self.state.borrow().clone();
                debug!(state = state.name(), "GetState");
                let _ = respond_to.send(state);
            }
            DashboardRequest::GetStats { respond_to } => {
                let _ = respond_to.send(self.stats);
            }
        }
    }

    fn refresh(&mut self, fetcher: &Arc<dyn OrderFetcher>) -> RefreshOutcome {
        let loading = self.state.borrow().is_loading();
        if loading {
            match self.controller.refresh_policy {
                RefreshPolicy::IgnoreWhileLoading => {
                    self.stats.ignored += 1;
                    debug!(in_flight = self.latest, "Refresh ignored, fetch in flight");
                    return RefreshOutcome::Ignored {
                        in_flight: self.latest,
                    };
                }
                RefreshPolicy::Supersede => {
                    debug!(superseded = self.latest, "Aborting fetch in flight");
                    self.in_flight.abort_all();
                }
            }
        }

        self.latest += 1;
        let generation = self.latest;
        self.stats.issued += 1;

        let fetcher = Arc::clone(fetcher);
        let handle = self.in_flight.spawn(async move { fetcher.fetch().await });
        self.generations.insert(handle.id(), generation);

        self.transition(LifecycleState::Loading { generation });
        RefreshOutcome::Started(generation)
    }

    fn joined(&mut self, joined: Result<(task::Id, FetchResult), JoinError>) {
        match joined {
            Ok((id, result)) => {
                if let Some(generation) = self.generations.remove(&id) {
                    self.complete(generation, result);
                }
            }
            Err(e) => {
                let generation = self.generations.remove(&e.id());
                if e.is_cancelled() {
                    self.stats.cancelled += 1;
                    debug!(?generation, "Superseded fetch cancelled");
                    return;
                }
                warn!(?generation, error = %e, "Fetch task failed");
                if let Some(generation) = generation {
                    let error = FetchError::transport(format!("fetch task failed: {e}"));
                    self.complete(generation, Err(error));
                }
            }
        }
    }

    fn complete(&mut self, generation: Generation, result: FetchResult) {
        if generation != self.latest {
            self.stats.discarded += 1;
            warn!(generation, latest = self.latest, "Discarding stale fetch result");
            return;
        }
        self.stats.accepted += 1;

        let next = match result {
            Ok(snapshot) => {
                let metrics = aggregate(&snapshot, &self.metrics);
                info!(
                    generation,
                    total_orders = metrics.total_orders,
                    completion_rate = metrics.completion_rate,
                    "Metrics updated"
                );
                self.last_good = Some(metrics.clone());
                LifecycleState::Ready {
                    generation,
                    metrics,
                }
            }
            Err(error) => {
                warn!(generation, error = %error, "Refresh failed");
                let stale = if self.controller.keep_stale_on_failure {
                    self.last_good.clone()
                } else {
                    None
                };
                LifecycleState::Failed {
                    generation,
                    error,
                    stale,
                }
            }
        };
        self.transition(next);
    }

    fn transition(&mut self, next: LifecycleState) {
        let previous = self.state.send_replace(next);
        let current = self.state.borrow();
        info!(
            from = previous.name(),
            to = current.name(),
            generation = ?current.generation(),
            "State changed"
        );
    }
}
