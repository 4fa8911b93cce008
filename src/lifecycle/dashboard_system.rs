use crate::clients::DashboardClient;
use crate::config::DashboardConfig;
use crate::fetcher::{FetchError, HttpOrderFetcher, OrderFetcher};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info, warn};

/// How long [`DashboardSystem::shutdown`] waits for the actor before aborting it.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// The runtime orchestrator for the dashboard.
///
/// `DashboardSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the dashboard actor
/// - **Dependency Wiring**: Injecting the order fetcher into the actor
///
/// # Example
///
/// ```ignore
/// let config = DashboardConfig::load(None)?;
/// let system = DashboardSystem::with_http(&config)?;
///
/// let metrics = system.dashboard_client.load().await?;
///
/// system.shutdown().await?;
/// ```
pub struct DashboardSystem {
    /// Client for interacting with the dashboard actor
    pub dashboard_client: DashboardClient,

    /// Task handle of the running actor (used for graceful shutdown)
    handle: JoinHandle<()>,
}

impl DashboardSystem {
    /// Spawns the dashboard actor with the given fetcher.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &DashboardConfig, fetcher: impl OrderFetcher) -> Self {
        let (actor, dashboard_client) =
            crate::dashboard_actor::new(config.controller, config.metrics);

        let fetcher: Arc<dyn OrderFetcher> = Arc::new(fetcher);
        let handle = tokio::spawn(actor.run(fetcher));

        Self {
            dashboard_client,
            handle,
        }
    }

    /// Spawns the dashboard actor backed by [`HttpOrderFetcher`].
    pub fn with_http(config: &DashboardConfig) -> Result<Self, FetchError> {
        let fetcher = HttpOrderFetcher::from_config(&config.fetch)?;
        info!(endpoint = fetcher.endpoint(), "Using HTTP order source");
        Ok(Self::new(config, fetcher))
    }

    /// Gracefully shuts down the system, waiting at most [`SHUTDOWN_GRACE`].
    pub async fn shutdown(self) -> Result<(), JoinError> {
        self.shutdown_within(SHUTDOWN_GRACE).await
    }

    /// Shuts down the system, aborting the actor if it has not stopped within `grace`.
    ///
    /// Dropping the client closes the request channel; the actor then exits its
    /// loop, abandoning any fetch still in flight. Other clones of the client
    /// keep the actor alive; if one is still held when `grace` runs out, the
    /// actor is aborted and the cancellation is returned as the error.
    pub async fn shutdown_within(self, grace: Duration) -> Result<(), JoinError> {
        info!("Shutting down system...");
        drop(self.dashboard_client);

        let mut handle = self.handle;
        let joined = match tokio::time::timeout(grace, &mut handle).await {
            Ok(joined) => joined,
            Err(_) => {
                warn!(?grace, "Actor still running, aborting");
                handle.abort();
                handle.await
            }
        };

        if let Err(e) = joined {
            error!("Actor task failed: {:?}", e);
            return Err(e);
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
