//! Tests for metrics emitted by sessions and copy actions.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and assert
//! on emitted metrics without needing a real exporter.

use std::sync::Arc;

use async_trait::async_trait;
use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use solsieve::telemetry;
use solsieve::{
    ClassificationOracle, ClassificationRequest, Completion, MemoryClipboard, Result,
    ResultPresenter, Session, SolsieveError,
};

// ============================================================================
// Mock oracles
// ============================================================================

struct MockOracle {
    payload: &'static str,
}

#[async_trait]
impl ClassificationOracle for MockOracle {
    fn name(&self) -> &str {
        "mock"
    }

    async fn classify(&self, _request: &ClassificationRequest) -> Result<String> {
        Ok(self.payload.to_string())
    }
}

struct FailingOracle;

#[async_trait]
impl ClassificationOracle for FailingOracle {
    fn name(&self) -> &str {
        "failing"
    }

    async fn classify(&self, _request: &ClassificationRequest) -> Result<String> {
        Err(SolsieveError::Communication("connection reset".into()))
    }
}

// ============================================================================
// Snapshot type alias for readability
// ============================================================================

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

// ============================================================================
// Helpers
// ============================================================================

/// Sum all counter values matching a given metric name.
fn counter_total(snapshot: &SnapshotVec, name: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Sum counter values for `name` carrying label `label = value`.
fn labelled_total(snapshot: &SnapshotVec, name: &str, label: &str, value: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| {
            key.kind() == MetricKind::Counter
                && key.key().name() == name
                && key
                    .key()
                    .labels()
                    .any(|l| l.key() == label && l.value() == value)
        })
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

/// Check if any histogram entries exist for a given metric name.
fn has_histogram(snapshot: &SnapshotVec, name: &str) -> bool {
    snapshot
        .iter()
        .any(|(key, _, _, _)| key.kind() == MetricKind::Histogram && key.key().name() == name)
}

/// Run `f` against a fresh local recorder and return the snapshot.
///
/// `block_in_place` keeps the sync `with_local_recorder` closure on the
/// current thread while `block_on` drives the async work.
fn record<F, Fut>(f: F) -> SnapshotVec
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(f()))
    });

    snapshotter.snapshot().into_vec()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn successful_classification_records_metrics() {
    let snapshot = record(|| async {
        let mut session = Session::new(Arc::new(MockOracle {
            payload: r#"{"non_solar_keywords":["a"]}"#,
        }));
        session.set_input("a");
        session.submit().await.unwrap();
    });

    assert_eq!(
        labelled_total(&snapshot, telemetry::CLASSIFICATIONS_TOTAL, "status", "ok"),
        1
    );
    assert!(
        has_histogram(&snapshot, telemetry::CLASSIFICATION_DURATION_SECONDS),
        "expected a duration histogram entry"
    );
    assert_eq!(counter_total(&snapshot, telemetry::MALFORMED_RESPONSES_TOTAL), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn failed_classification_records_error_status() {
    let snapshot = record(|| async {
        let mut session = Session::new(Arc::new(FailingOracle));
        session.set_input("a");
        session.submit().await.unwrap();
    });

    assert_eq!(
        labelled_total(&snapshot, telemetry::CLASSIFICATIONS_TOTAL, "status", "error"),
        1
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn malformed_payload_is_counted() {
    let snapshot = record(|| async {
        let mut session = Session::new(Arc::new(MockOracle { payload: "nope" }));
        session.set_input("a");
        session.submit().await.unwrap();
    });

    // The call itself succeeded; only normalization failed.
    assert_eq!(
        labelled_total(&snapshot, telemetry::CLASSIFICATIONS_TOTAL, "status", "ok"),
        1
    );
    assert_eq!(counter_total(&snapshot, telemetry::MALFORMED_RESPONSES_TOTAL), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn validation_failure_records_no_classification() {
    let snapshot = record(|| async {
        let mut session = Session::new(Arc::new(MockOracle { payload: "{}" }));
        session.set_input("  ");
        let _ = session.submit().await;
    });

    assert_eq!(counter_total(&snapshot, telemetry::CLASSIFICATIONS_TOTAL), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn stale_completion_is_counted() {
    let snapshot = record(|| async {
        let mut session = Session::new(Arc::new(MockOracle { payload: "{}" }));
        session.set_input("a");
        let first = session.begin().unwrap();
        session.reset();
        session.complete(Completion::new(first.sequence(), Ok("{}".into())));
    });

    assert_eq!(counter_total(&snapshot, telemetry::STALE_COMPLETIONS_TOTAL), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn copies_are_counted_by_kind() {
    let snapshot = record(|| async {
        let mut session = Session::new(Arc::new(MockOracle {
            payload: r#"{"non_solar_keywords":["a"]}"#,
        }));
        session.set_input("a");
        session.submit().await.unwrap();

        let mut presenter = ResultPresenter::new(Box::new(MemoryClipboard::new()));
        presenter.copy_list(&session).unwrap();
        presenter.copy_all(&session).unwrap();
        presenter.copy_all(&session).unwrap();
    });

    assert_eq!(labelled_total(&snapshot, telemetry::COPIES_TOTAL, "kind", "list"), 1);
    assert_eq!(labelled_total(&snapshot, telemetry::COPIES_TOTAL, "kind", "all"), 2);
}

#[tokio::test]
async fn metrics_are_noop_without_recorder() {
    // Verify no panics when no recorder is installed.
    let mut session = Session::new(Arc::new(MockOracle { payload: "{}" }));
    session.set_input("a");
    session.submit().await.unwrap();
}
