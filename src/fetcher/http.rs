//! HTTP implementation of [`OrderFetcher`].

use crate::config::FetchConfig;
use crate::fetcher::{FetchError, OrderFetcher};
use crate::model::{OrderSnapshot, OrdersPayload};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Fetches the full order list with a single `GET` request.
///
/// The request timeout is enforced by the underlying `reqwest` client; a
/// timeout surfaces as [`FetchError::TransportFailure`].
#[derive(Debug, Clone)]
pub struct HttpOrderFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpOrderFetcher {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &FetchConfig) -> Result<Self, FetchError> {
        Self::new(&config.endpoint, Duration::from_secs(config.timeout_secs))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl OrderFetcher for HttpOrderFetcher {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch(&self) -> Result<OrderSnapshot, FetchError> {
        debug!("Sending request");
        let response = self.client.get(&self.endpoint).send().await.map_err(|e| {
            warn!(error = %e, "Request failed");
            FetchError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Orders service returned an error status");
            return Err(FetchError::transport(format!(
                "orders service returned HTTP {status}"
            )));
        }

        let body = response.bytes().await?;
        let snapshot = parse_orders(&body)?;
        info!(orders = snapshot.len(), "Fetched orders");
        Ok(snapshot)
    }
}

/// Decodes an orders service response body into a snapshot.
///
/// The body must be a JSON object whose `orders` field is an array of order
/// objects. Anything else is a [`FetchError::MalformedResponse`].
pub fn parse_orders(body: &[u8]) -> Result<OrderSnapshot, FetchError> {
    let payload: OrdersPayload = serde_json::from_slice(body)?;
    Ok(payload.orders)
}
