//! # Metrics Aggregator
//!
//! Turns one [`OrderSnapshot`] into a [`MetricsBundle`].
//!
//! The transformation is pure: no I/O, no shared state, no suspension. It runs
//! once per accepted snapshot and always starts from scratch, so two calls with
//! the same snapshot and configuration produce identical bundles.
//!
//! ## What is computed and what is not
//!
//! | Field | Source |
//! |-------|--------|
//! | `total_orders` | snapshot length |
//! | `delivered_orders` | records whose status is exactly `"Delivered"` |
//! | `completion_rate` | delivered / total, integer percent, rounded half up |
//! | `total_revenue` | sum of prices, missing price counts as zero |
//! | `profit_margin` | [`MetricsConfig`], passed through |
//! | `growth_rate` | [`MetricsConfig`], passed through |

use crate::model::{MetricsBundle, MetricsConfig, OrderSnapshot};
use tracing::trace;

/// Computes the dashboard metrics for a snapshot.
pub fn aggregate(snapshot: &OrderSnapshot, config: &MetricsConfig) -> MetricsBundle {
    let total_orders = snapshot.len() as u64;
    let delivered_orders = snapshot.iter().filter(|order| order.is_delivered()).count() as u64;
    let total_revenue = total_revenue(snapshot);

    let bundle = MetricsBundle {
        total_orders,
        delivered_orders,
        completion_rate: completion_rate(delivered_orders, total_orders),
        total_revenue,
        profit_margin: config.profit_margin,
        growth_rate: config.growth_rate,
    };
    trace!(?bundle, "Aggregated snapshot");
    bundle
}

/// Integer percentage of `delivered` over `total`, rounded half up.
///
/// Returns 0 for an empty snapshot. Integer arithmetic keeps the tie-break
/// identical on every platform: `floor((200 * delivered + total) / (2 * total))`.
pub fn completion_rate(delivered: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    let rate = (200 * delivered + total) / (2 * total);
    rate as u32
}

/// Sum of all prices. Records without a price contribute nothing.
pub fn total_revenue(snapshot: &OrderSnapshot) -> f64 {
    snapshot.iter().map(|order| order.revenue()).sum()
}
