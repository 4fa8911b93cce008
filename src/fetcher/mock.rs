//! # Mock Fetcher
//!
//! [`MockFetcher`] implements [`OrderFetcher`] from a queue of scripted
//! responses. Each call to `fetch` consumes the next expectation in order.
//!
//! ## When to use Mocks vs a Real Server
//!
//! | Feature | MockFetcher | HttpOrderFetcher + test server |
//! |---------|-------------|--------------------------------|
//! | **Speed** | Instant | Fast, but binds a socket |
//! | **Ordering** | Fully controlled through gates | Subject to the network stack |
//! | **Use Case** | Controller state machine, stale results | Wire format, HTTP status handling |
//!
//! ## Controlling completion order
//!
//! A held expectation does not resolve until its [`FetchGate`] is released.
//! This is how tests make an older fetch finish after a newer one:
//!
//! ```rust
//! use order_dashboard::fetcher::mock::MockFetcher;
//! use order_dashboard::fetcher::OrderFetcher;
//! use order_dashboard::model::OrderSnapshot;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockFetcher::new();
//!     let gate = mock.expect_fetch().hold().return_ok(OrderSnapshot::default());
//!
//!     let fetcher = mock.clone();
//!     let pending = tokio::spawn(async move { fetcher.fetch().await });
//!
//!     gate.release();
//!     assert!(pending.await.unwrap().is_ok());
//!     mock.verify();
//! }
//! ```

use crate::fetcher::{FetchError, OrderFetcher};
use crate::model::OrderSnapshot;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;
use tracing::debug;

type Outcome = Result<OrderSnapshot, FetchError>;

/// A scripted response, optionally held back until a gate is released.
struct Expectation {
    response: Outcome,
    gate: Option<oneshot::Receiver<()>>,
}

/// An [`OrderFetcher`] that replays scripted responses.
///
/// Clones share the same expectation queue, so a test can keep one handle for
/// setup and verification while the controller owns another.
#[derive(Clone, Default)]
pub struct MockFetcher {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    calls: Arc<AtomicUsize>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the response for the next unanswered `fetch`.
    pub fn expect_fetch(&self) -> FetchExpectationBuilder {
        FetchExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Number of `fetch` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Panics unless every queued expectation was consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all fetch expectations were met. {} remaining", remaining);
        }
    }
}

fn lock(queue: &Mutex<VecDeque<Expectation>>) -> MutexGuard<'_, VecDeque<Expectation>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl OrderFetcher for MockFetcher {
    async fn fetch(&self) -> Result<OrderSnapshot, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let expectation = lock(&self.expectations).pop_front();

        let Some(Expectation { response, gate }) = expectation else {
            debug!(call, "No expectation queued");
            return Err(FetchError::transport(format!(
                "unexpected fetch #{call}: no response queued"
            )));
        };

        if let Some(gate) = gate {
            debug!(call, "Holding response until released");
            // A dropped gate releases the response as well.
            let _ = gate.await;
        }
        debug!(call, ok = response.is_ok(), "Responding");
        response
    }
}

/// Builder for an immediate fetch expectation.
pub struct FetchExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl FetchExpectationBuilder {
    /// Responds with `snapshot`.
    pub fn return_ok(self, snapshot: OrderSnapshot) {
        self.push(Ok(snapshot), None);
    }

    /// Responds with `error`.
    pub fn return_err(self, error: FetchError) {
        self.push(Err(error), None);
    }

    /// Holds the response until the returned [`FetchGate`] is released.
    pub fn hold(self) -> HeldExpectationBuilder {
        HeldExpectationBuilder { inner: self }
    }

    fn push(self, response: Outcome, gate: Option<oneshot::Receiver<()>>) {
        lock(&self.expectations).push_back(Expectation { response, gate });
    }
}

/// Builder for a held fetch expectation.
pub struct HeldExpectationBuilder {
    inner: FetchExpectationBuilder,
}

impl HeldExpectationBuilder {
    pub fn return_ok(self, snapshot: OrderSnapshot) -> FetchGate {
        self.push(Ok(snapshot))
    }

    pub fn return_err(self, error: FetchError) -> FetchGate {
        self.push(Err(error))
    }

    fn push(self, response: Outcome) -> FetchGate {
        let (release, gate) = oneshot::channel();
        self.inner.push(response, Some(gate));
        FetchGate { release }
    }
}

/// Releases a held fetch response.
pub struct FetchGate {
    release: oneshot::Sender<()>,
}

impl FetchGate {
    pub fn release(self) {
        let _ = self.release.send(());
    }

    /// True once the fetch waiting on this gate has been dropped, e.g. aborted.
    pub fn is_abandoned(&self) -> bool {
        self.release.is_closed()
    }
}
