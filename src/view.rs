//! # Rendering Contract
//!
//! [`DashboardView`] is everything the presentation layer receives: the lifecycle
//! state, the metric cards, the three proportion charts and any error message.
//! Nothing else crosses that boundary.

use crate::dashboard_actor::{Generation, LifecycleState};
use crate::fetcher::FetchErrorKind;
use crate::model::{ChartSet, MetricsBundle};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// `"idle"`, `"loading"`, `"ready"` or `"failed"`.
    pub state: &'static str,
    pub generation: Option<Generation>,
    pub metrics: Option<MetricsBundle>,
    pub charts: Option<ChartSet>,
    pub error: Option<String>,
    pub error_kind: Option<FetchErrorKind>,
    /// Only a failed refresh offers a retry.
    pub can_retry: bool,
    /// `metrics` come from an earlier refresh than the one that just failed.
    pub stale: bool,
}

impl From<&LifecycleState> for DashboardView {
    fn from(state: &LifecycleState) -> Self {
        let (metrics, stale) = match state {
            LifecycleState::Ready { metrics, .. } => (Some(metrics.clone()), false),
            LifecycleState::Failed { stale, .. } => (stale.clone(), stale.is_some()),
            LifecycleState::Idle | LifecycleState::Loading { .. } => (None, false),
        };
        let error = state.error();

        Self {
            state: state.name(),
            generation: state.generation(),
            charts: metrics.as_ref().map(MetricsBundle::charts),
            metrics,
            error: error.map(ToString::to_string),
            error_kind: error.map(|e| e.kind()),
            can_retry: error.is_some(),
            stale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::FetchError;

    fn bundle() -> MetricsBundle {
        MetricsBundle {
            total_orders: 4,
            delivered_orders: 1,
            completion_rate: 25,
            total_revenue: 80.0,
            profit_margin: 35,
            growth_rate: 12,
        }
    }

    #[test]
    fn test_idle_view_is_empty() {
        let view = DashboardView::from(&LifecycleState::Idle);
        assert_eq!(view.state, "idle");
        assert!(view.metrics.is_none());
        assert!(view.charts.is_none());
        assert!(!view.can_retry);
    }

    #[test]
    fn test_ready_view_carries_metrics_and_charts() {
        let view = DashboardView::from(&LifecycleState::Ready {
            generation: 2,
            metrics: bundle(),
        });

        assert_eq!(view.state, "ready");
        assert_eq!(view.generation, Some(2));
        let charts = view.charts.unwrap();
        assert_eq!(charts.order_status.first.value, 1);
        assert_eq!(charts.order_status.second.value, 3);
        assert!(view.error.is_none());
        assert!(!view.stale);
    }

    #[test]
    fn test_failed_view_offers_retry_and_marks_stale() {
        let view = DashboardView::from(&LifecycleState::Failed {
            generation: 3,
            error: FetchError::transport("orders service returned HTTP 500"),
            stale: Some(bundle()),
        });

        assert_eq!(view.state, "failed");
        assert!(view.can_retry);
        assert!(view.stale);
        assert_eq!(view.error_kind, Some(FetchErrorKind::TransportFailure));
        assert_eq!(
            view.error.as_deref(),
            Some("Transport failure: orders service returned HTTP 500")
        );
        assert_eq!(view.metrics, Some(bundle()));
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let view = DashboardView::from(&LifecycleState::Failed {
            generation: 1,
            error: FetchError::malformed("missing field `orders`"),
            stale: None,
        });
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["state"], "failed");
        assert_eq!(json["canRetry"], true);
        assert_eq!(json["errorKind"], "malformedResponse");
        assert!(json["metrics"].is_null());
    }
}
