//! A single order as reported by the orders service.
//!
//! Only `status` and `price` matter to the dashboard. Every other field the
//! service sends (ids, customer data, timestamps) is ignored during decoding.
//!
//! # Missing data
//! - A missing `status` decodes to an empty string, which never counts as delivered.
//! - A missing or `null` `price` decodes to `None` and contributes zero revenue.

use serde::{Deserialize, Serialize};

/// The status value that counts an order as completed.
pub const DELIVERED_STATUS: &str = "Delivered";

/// An order reduced to the fields the dashboard reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub price: Option<f64>,
}

impl OrderRecord {
    pub fn new(status: impl Into<String>, price: Option<f64>) -> Self {
        Self {
            status: status.into(),
            price,
        }
    }

    /// Exact, case-sensitive match against [`DELIVERED_STATUS`].
    pub fn is_delivered(&self) -> bool {
        self.status == DELIVERED_STATUS
    }

    /// The price this order contributes to revenue.
    pub fn revenue(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }
}

/// All orders visible at fetch time.
///
/// A snapshot is consumed whole by one aggregation and never updated in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderSnapshot(Vec<OrderRecord>);

impl OrderSnapshot {
    pub fn new(records: Vec<OrderRecord>) -> Self {
        Self(records)
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrderRecord> {
        self.0.iter()
    }
}

impl From<Vec<OrderRecord>> for OrderSnapshot {
    fn from(records: Vec<OrderRecord>) -> Self {
        Self(records)
    }
}

impl FromIterator<OrderRecord> for OrderSnapshot {
    fn from_iter<I: IntoIterator<Item = OrderRecord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Wire shape of the orders service response: `{ "orders": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersPayload {
    pub orders: OrderSnapshot,
}
