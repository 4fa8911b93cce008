//! Derived metrics and chart-ready proportions.
//!
//! Everything here is produced by [`crate::aggregator::aggregate`] and handed
//! unchanged to the presentation layer.

use serde::{Deserialize, Serialize};

/// Percentages supplied at startup and shown as if they were computed.
///
/// Neither value is derived from order data. `profit_margin` stands in for a real
/// cost model and `growth_rate` for a comparison against historical snapshots;
/// both are passed through the aggregator untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub profit_margin: u32,
    pub growth_rate: u32,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            profit_margin: 35,
            growth_rate: 12,
        }
    }
}

/// The summary values shown on the dashboard cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsBundle {
    pub total_orders: u64,
    pub delivered_orders: u64,
    /// Integer percentage, rounded half up. Zero when there are no orders.
    pub completion_rate: u32,
    pub total_revenue: f64,
    pub profit_margin: u32,
    pub growth_rate: u32,
}

impl MetricsBundle {
    pub fn pending_orders(&self) -> u64 {
        self.total_orders.saturating_sub(self.delivered_orders)
    }

    /// Builds the three proportion charts for this bundle.
    pub fn charts(&self) -> ChartSet {
        ChartSet {
            order_status: ChartProportion::new(
                "Completed",
                self.delivered_orders,
                "Pending",
                self.total_orders,
            ),
            profit: ChartProportion::new("Profit", u64::from(self.profit_margin), "Cost", 100),
            growth: ChartProportion::new("Growth", u64::from(self.growth_rate), "Target", 100),
        }
    }
}

/// One labelled part of a [`ChartProportion`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub label: String,
    pub value: u64,
}

/// A two-part split whose parts always add up to `total`.
///
/// The second share is derived as `total - first`, so the invariant holds by
/// construction even when the first value comes from an unrelated source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartProportion {
    pub first: Share,
    pub second: Share,
    pub total: u64,
}

impl ChartProportion {
    /// `first` is clamped to `total`.
    pub fn new(
        first_label: impl Into<String>,
        first: u64,
        second_label: impl Into<String>,
        total: u64,
    ) -> Self {
        let first = first.min(total);
        Self {
            first: Share {
                label: first_label.into(),
                value: first,
            },
            second: Share {
                label: second_label.into(),
                value: total - first,
            },
            total,
        }
    }

    pub fn sum(&self) -> u64 {
        self.first.value + self.second.value
    }
}

/// The three proportion charts rendered next to the metric cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSet {
    /// Completed / Pending, summing to the order count.
    pub order_status: ChartProportion,
    /// Profit / Cost, summing to 100.
    pub profit: ChartProportion,
    /// Growth / Target, summing to 100.
    pub growth: ChartProportion,
}
