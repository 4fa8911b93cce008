use async_trait::async_trait;
use order_dashboard::aggregator::aggregate;
use order_dashboard::clients::DashboardClient;
use order_dashboard::config::{ControllerConfig, RefreshPolicy};
use order_dashboard::dashboard_actor::{self, DashboardError, LifecycleState, RefreshOutcome};
use order_dashboard::fetcher::mock::MockFetcher;
use order_dashboard::fetcher::{FetchError, FetchErrorKind, OrderFetcher};
use order_dashboard::model::{MetricsConfig, OrderRecord, OrderSnapshot};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

fn metrics_config() -> MetricsConfig {
    MetricsConfig {
        profit_margin: 35,
        growth_rate: 12,
    }
}

fn reference_snapshot() -> OrderSnapshot {
    OrderSnapshot::new(vec![
        OrderRecord::new("Delivered", Some(500.0)),
        OrderRecord::new("Pending", Some(300.0)),
        OrderRecord::new("Delivered", Some(200.0)),
    ])
}

fn small_snapshot() -> OrderSnapshot {
    OrderSnapshot::new(vec![OrderRecord::new("Pending", Some(10.0))])
}

/// Real dashboard actor with a mocked order source.
fn start(mock: &MockFetcher, controller: ControllerConfig) -> (DashboardClient, JoinHandle<()>) {
    let (actor, client) = dashboard_actor::new(controller, metrics_config());
    let handle = tokio::spawn(actor.run(Arc::new(mock.clone())));
    (client, handle)
}

async fn stop(client: DashboardClient, handle: JoinHandle<()>) {
    drop(client);
    timeout(WAIT, handle)
        .await
        .expect("actor did not shut down")
        .unwrap();
}

/// Waits until the actor's fetch tasks have called the mock `n` times.
async fn wait_for_calls(mock: &MockFetcher, n: usize) {
    timeout(WAIT, async {
        while mock.calls() < n {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("fetch was not issued");
}

async fn wait_for_cancelled(client: &DashboardClient, n: u64) {
    timeout(WAIT, async {
        while client.stats().await.unwrap().cancelled < n {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("superseded fetch was not cancelled");
}

/// A fetcher whose task dies instead of returning.
struct PanickingFetcher;

#[async_trait]
impl OrderFetcher for PanickingFetcher {
    async fn fetch(&self) -> Result<OrderSnapshot, FetchError> {
        panic!("orders decoder blew up");
    }
}

#[tokio::test]
async fn test_initial_state_is_idle() {
    let mock = MockFetcher::new();
    let (client, handle) = start(&mock, ControllerConfig::default());

    assert_eq!(client.state().await.unwrap(), LifecycleState::Idle);
    assert_eq!(client.wait_until_settled().await.unwrap(), LifecycleState::Idle);
    assert_eq!(mock.calls(), 0);

    stop(client, handle).await;
}

#[tokio::test]
async fn test_refresh_produces_ready_metrics() {
    let mock = MockFetcher::new();
    mock.expect_fetch().return_ok(reference_snapshot());
    let (client, handle) = start(&mock, ControllerConfig::default());

    assert_eq!(client.refresh().await.unwrap(), RefreshOutcome::Started(1));
    let state = client.wait_until_settled().await.unwrap();

    let metrics = state.metrics().expect("ready state carries metrics");
    assert_eq!(metrics.total_orders, 3);
    assert_eq!(metrics.delivered_orders, 2);
    assert_eq!(metrics.completion_rate, 67);
    assert_eq!(metrics.total_revenue, 1000.0);
    assert_eq!(metrics.profit_margin, 35);
    assert_eq!(metrics.growth_rate, 12);
    assert_eq!(state.generation(), Some(1));

    mock.verify();
    stop(client, handle).await;
}

#[tokio::test]
async fn test_state_is_loading_while_fetch_in_flight() {
    let mock = MockFetcher::new();
    let gate = mock.expect_fetch().hold().return_ok(small_snapshot());
    let (client, handle) = start(&mock, ControllerConfig::default());

    client.refresh().await.unwrap();
    wait_for_calls(&mock, 1).await;

    // The actor keeps answering while the fetch is held.
    assert_eq!(
        client.state().await.unwrap(),
        LifecycleState::Loading { generation: 1 }
    );
    let view = client.view().await.unwrap();
    assert_eq!(view.state, "loading");
    assert!(view.metrics.is_none());
    assert!(!view.can_retry);

    gate.release();
    let state = client.wait_until_settled().await.unwrap();
    assert_eq!(state.name(), "ready");

    stop(client, handle).await;
}

#[tokio::test]
async fn test_failure_then_retry_reaches_ready() {
    let mock = MockFetcher::new();
    mock.expect_fetch()
        .return_err(FetchError::transport("orders service returned HTTP 500 Internal Server Error"));
    mock.expect_fetch().return_ok(reference_snapshot());
    let (client, handle) = start(&mock, ControllerConfig::default());

    client.refresh().await.unwrap();
    let failed = client.wait_until_settled().await.unwrap();
    match &failed {
        LifecycleState::Failed {
            generation,
            error,
            stale,
        } => {
            assert_eq!(*generation, 1);
            assert_eq!(error.kind(), FetchErrorKind::TransportFailure);
            assert!(stale.is_none(), "no bundle before the first success");
        }
        other => panic!("expected Failed, got {:?}", other),
    }
    assert!(failed.metrics().is_none());

    let view = client.view().await.unwrap();
    assert!(view.can_retry);
    assert!(view.metrics.is_none());

    assert_eq!(client.retry().await.unwrap(), RefreshOutcome::Started(2));
    let ready = client.wait_until_settled().await.unwrap();
    assert_eq!(
        ready,
        LifecycleState::Ready {
            generation: 2,
            metrics: aggregate(&reference_snapshot(), &metrics_config()),
        }
    );

    mock.verify();
    stop(client, handle).await;
}

#[tokio::test]
async fn test_failure_after_success_keeps_stale_bundle() {
    let mock = MockFetcher::new();
    mock.expect_fetch().return_ok(reference_snapshot());
    mock.expect_fetch()
        .return_err(FetchError::malformed("missing field `orders`"));
    let (client, handle) = start(&mock, ControllerConfig::default());

    let first = client.load().await.unwrap();

    client.refresh().await.unwrap();
    let state = client.wait_until_settled().await.unwrap();

    assert_eq!(state.error().map(FetchError::kind), Some(FetchErrorKind::MalformedResponse));
    assert!(state.metrics().is_none());
    match state {
        LifecycleState::Failed { stale, .. } => assert_eq!(stale, Some(first)),
        other => panic!("expected Failed, got {:?}", other),
    }

    let view = client.view().await.unwrap();
    assert!(view.stale);
    assert!(view.charts.is_some());

    stop(client, handle).await;
}

#[tokio::test]
async fn test_failure_can_clear_previous_bundle() {
    let mock = MockFetcher::new();
    mock.expect_fetch().return_ok(reference_snapshot());
    mock.expect_fetch().return_err(FetchError::transport("timeout"));
    let controller = ControllerConfig {
        keep_stale_on_failure: false,
        ..ControllerConfig::default()
    };
    let (client, handle) = start(&mock, controller);

    client.load().await.unwrap();
    let err = client.load().await.unwrap_err();
    assert_eq!(err, DashboardError::Fetch(FetchError::transport("timeout")));

    let view = client.view().await.unwrap();
    assert!(view.metrics.is_none());
    assert!(!view.stale);

    stop(client, handle).await;
}

#[tokio::test]
async fn test_each_refresh_recomputes_from_scratch() {
    let mock = MockFetcher::new();
    mock.expect_fetch().return_ok(reference_snapshot());
    mock.expect_fetch().return_ok(small_snapshot());
    let (client, handle) = start(&mock, ControllerConfig::default());

    let first = client.load().await.unwrap();
    let second = client.load().await.unwrap();

    assert_eq!(first.total_orders, 3);
    assert_eq!(second.total_orders, 1);
    assert_eq!(second.delivered_orders, 0);
    assert_eq!(second.completion_rate, 0);
    assert_eq!(second.total_revenue, 10.0);

    stop(client, handle).await;
}

/// Request A, then B before A resolves. A is aborted; only B settles the state.
#[tokio::test]
async fn test_superseded_fetch_is_cancelled() {
    let mock = MockFetcher::new();
    let gate_a = mock.expect_fetch().hold().return_ok(reference_snapshot());
    let gate_b = mock.expect_fetch().hold().return_ok(small_snapshot());
    let (client, handle) = start(&mock, ControllerConfig::default());

    assert_eq!(client.refresh().await.unwrap(), RefreshOutcome::Started(1));
    wait_for_calls(&mock, 1).await;
    assert_eq!(client.refresh().await.unwrap(), RefreshOutcome::Started(2));
    wait_for_cancelled(&client, 1).await;

    // Fetch A was dropped without ever answering.
    assert!(gate_a.is_abandoned());
    assert_eq!(
        client.state().await.unwrap(),
        LifecycleState::Loading { generation: 2 }
    );

    wait_for_calls(&mock, 2).await;
    gate_b.release();
    let settled = client.wait_until_settled().await.unwrap();
    let expected = LifecycleState::Ready {
        generation: 2,
        metrics: aggregate(&small_snapshot(), &metrics_config()),
    };
    assert_eq!(settled, expected);

    // Releasing A afterwards changes nothing.
    gate_a.release();
    assert_eq!(client.state().await.unwrap(), expected);
    let stats = client.stats().await.unwrap();
    assert_eq!(stats.issued, 2);
    assert_eq!(stats.accepted, 1);
    assert_eq!(stats.cancelled, 1);
    assert_eq!(stats.discarded, 0);

    mock.verify();
    stop(client, handle).await;
}

#[tokio::test]
async fn test_rapid_refreshes_keep_one_fetch_outstanding() {
    let mock = MockFetcher::new();
    let gates: Vec<_> = (0..3)
        .map(|_| mock.expect_fetch().hold().return_ok(small_snapshot()))
        .collect();
    let (client, handle) = start(&mock, ControllerConfig::default());

    for n in 1..=3 {
        client.refresh().await.unwrap();
        wait_for_calls(&mock, n).await;
    }
    wait_for_cancelled(&client, 2).await;

    assert!(gates[0].is_abandoned());
    assert!(gates[1].is_abandoned());
    assert!(!gates[2].is_abandoned());

    stop(client, handle).await;
}

#[tokio::test]
async fn test_superseding_refresh_can_end_in_failure() {
    let mock = MockFetcher::new();
    let _gate_a = mock.expect_fetch().hold().return_ok(reference_snapshot());
    mock.expect_fetch()
        .return_err(FetchError::transport("connection reset"));
    let (client, handle) = start(&mock, ControllerConfig::default());

    client.refresh().await.unwrap();
    wait_for_calls(&mock, 1).await;
    client.refresh().await.unwrap();

    let state = client.wait_until_settled().await.unwrap();
    assert_eq!(state.generation(), Some(2));
    assert_eq!(state.error(), Some(&FetchError::transport("connection reset")));
    assert!(state.metrics().is_none());

    stop(client, handle).await;
}

#[tokio::test]
async fn test_ignore_policy_drops_refresh_while_loading() {
    let mock = MockFetcher::new();
    let gate = mock.expect_fetch().hold().return_ok(reference_snapshot());
    let controller = ControllerConfig {
        refresh_policy: RefreshPolicy::IgnoreWhileLoading,
        ..ControllerConfig::default()
    };
    let (client, handle) = start(&mock, controller);

    assert_eq!(client.refresh().await.unwrap(), RefreshOutcome::Started(1));
    assert_eq!(
        client.refresh().await.unwrap(),
        RefreshOutcome::Ignored { in_flight: 1 }
    );

    gate.release();
    let state = client.wait_until_settled().await.unwrap();
    assert_eq!(state.generation(), Some(1));
    assert_eq!(state.metrics().map(|m| m.total_orders), Some(3));

    let stats = client.stats().await.unwrap();
    assert_eq!(stats.issued, 1);
    assert_eq!(stats.ignored, 1);
    assert_eq!(mock.calls(), 1);

    stop(client, handle).await;
}

#[tokio::test]
async fn test_panicking_fetch_settles_as_failure() {
    let controller = ControllerConfig {
        refresh_policy: RefreshPolicy::IgnoreWhileLoading,
        ..ControllerConfig::default()
    };
    let (actor, client) = dashboard_actor::new(controller, metrics_config());
    let handle = tokio::spawn(actor.run(Arc::new(PanickingFetcher)));

    assert_eq!(client.refresh().await.unwrap(), RefreshOutcome::Started(1));
    let state = timeout(WAIT, client.wait_until_settled())
        .await
        .expect("controller stayed loading")
        .unwrap();
    assert_eq!(state.generation(), Some(1));
    match state.error() {
        Some(FetchError::TransportFailure(reason)) => {
            assert!(reason.starts_with("fetch task failed"), "reason: {}", reason)
        }
        other => panic!("expected transport failure, got {:?}", other),
    }
    assert!(client.view().await.unwrap().can_retry);

    // Retry is accepted rather than ignored as if still loading.
    assert_eq!(client.retry().await.unwrap(), RefreshOutcome::Started(2));
    let state = timeout(WAIT, client.wait_until_settled())
        .await
        .expect("controller stayed loading")
        .unwrap();
    assert_eq!(state.generation(), Some(2));
    assert_eq!(state.name(), "failed");

    stop(client, handle).await;
}

#[tokio::test]
async fn test_subscribers_observe_transitions() {
    let mock = MockFetcher::new();
    mock.expect_fetch().return_ok(small_snapshot());
    let (client, handle) = start(&mock, ControllerConfig::default());
    let mut updates = client.subscribe();

    client.refresh().await.unwrap();
    let ready = timeout(WAIT, updates.wait_for(|s| s.name() == "ready"))
        .await
        .expect("no ready state observed")
        .unwrap()
        .clone();
    assert_eq!(ready.generation(), Some(1));

    drop(updates);
    stop(client, handle).await;
}

#[tokio::test]
async fn test_shutdown_abandons_fetch_in_flight() {
    let mock = MockFetcher::new();
    let _gate = mock.expect_fetch().hold().return_ok(reference_snapshot());
    let (client, handle) = start(&mock, ControllerConfig::default());

    client.refresh().await.unwrap();
    wait_for_calls(&mock, 1).await;

    stop(client, handle).await;
}

#[tokio::test]
async fn test_closed_actor_reports_error() {
    let mock = MockFetcher::new();
    let (client, handle) = start(&mock, ControllerConfig::default());
    handle.abort();
    let _ = handle.await;

    assert_eq!(client.refresh().await, Err(DashboardError::ActorClosed));
}
