//! # Order Fetcher
//!
//! The boundary between the dashboard and the orders service.
//!
//! ## Structure
//!
//! - [`OrderFetcher`] - the one operation the controller depends on
//! - [`http`] - [`HttpOrderFetcher`], the production implementation on `reqwest`
//! - [`error`] - [`FetchError`] and its [`FetchErrorKind`]
//! - [`mock`] - [`MockFetcher`](mock::MockFetcher) with scripted responses for tests
//!
//! ## Contract
//!
//! A fetch either yields a complete [`OrderSnapshot`] or a [`FetchError`]. There
//! is no partial result and no internal retry: retrying is an operator decision
//! made through the dashboard client. Fetching has no side effects besides the
//! request itself, so calling it repeatedly is safe.

pub mod error;
pub mod http;
pub mod mock;

pub use error::*;
pub use self::http::*;

use crate::model::OrderSnapshot;
use async_trait::async_trait;
use std::sync::Arc;

/// Source of order snapshots.
///
/// Implementations hold their own endpoint configuration; `fetch` takes no input.
#[async_trait]
pub trait OrderFetcher: Send + Sync + 'static {
    /// Retrieves every order currently visible at the source.
    async fn fetch(&self) -> Result<OrderSnapshot, FetchError>;
}

#[async_trait]
impl<F: OrderFetcher + ?Sized> OrderFetcher for Arc<F> {
    async fn fetch(&self) -> Result<OrderSnapshot, FetchError> {
        (**self).fetch().await
    }
}
