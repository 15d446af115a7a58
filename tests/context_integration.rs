//! Integration tests for context state, observers and refresh drivers.
//!
//! These tests verify the end-to-end flow:
//! 1. A store creates the context for a key
//! 2. A driver collects metrics from a source on an interval
//! 3. Each round recomputes the score and colors
//! 4. Subscribed observers receive every round until they unsubscribe
//! 5. Teardown stops the driver and silences the context
//!
//! Uses in-memory implementations only.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use tension_engine::adapters::{InMemoryContextStore, StaticMetricsSource};
use tension_engine::domain::context::{backend_descriptor, ConnectionStatus, TensionUpdate};
use tension_engine::domain::foundation::ContextKey;
use tension_engine::domain::tension::{AnalyzerSettings, MetricBag, MetricKind, Severity, Trend};
use tension_engine::ports::{ObserverError, TensionObserver};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Observer recording every score it sees
#[derive(Default)]
struct RecordingObserver {
    scores: Mutex<Vec<f64>>,
}

impl RecordingObserver {
    fn scores(&self) -> Vec<f64> {
        self.scores.lock().unwrap().clone()
    }
}

impl TensionObserver for RecordingObserver {
    fn on_update(&self, update: &TensionUpdate) -> Result<(), ObserverError> {
        self.scores.lock().unwrap().push(update.score);
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

fn key(context_type: &str, scope: &str) -> ContextKey {
    ContextKey::new(context_type, scope, "integration").unwrap()
}

fn store() -> InMemoryContextStore {
    InMemoryContextStore::new(AnalyzerSettings::default()).unwrap()
}

fn cpu(value: f64) -> MetricBag {
    MetricBag::new().with(MetricKind::CpuUsage, value)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn subscribe_then_refresh_delivers_once() {
    let store = store();
    let context = store.get_or_create(&key("api", "ENTERPRISE")).await.unwrap();
    let observer = Arc::new(RecordingObserver::default());
    let subscription = context.subscribe(observer.clone());

    context.refresh(&cpu(20.0)).unwrap();
    assert_eq!(observer.scores(), vec![20.0]);

    subscription.unsubscribe();
    context.refresh(&cpu(30.0)).unwrap();
    assert_eq!(observer.scores(), vec![20.0]);
}

#[tokio::test]
async fn rising_load_degrades_trend_and_escalates() {
    let store = store();
    let context = store.get_or_create(&key("storage", "ENTERPRISE")).await.unwrap();

    for _ in 0..3 {
        context.refresh(&cpu(20.0)).unwrap();
    }
    let update = context.refresh(&cpu(95.0)).unwrap();

    assert_eq!(update.trend, Trend::Degrading);
    assert_eq!(update.colors.effective_tension, 100.0);
    assert_eq!(update.recommendations[0].severity, Severity::Urgent);
    assert_eq!(update.colors.hex, "#D92626");
}

#[tokio::test]
async fn contexts_are_independent() {
    let store = store();
    let api = store.get_or_create(&key("api", "DEVELOPMENT")).await.unwrap();
    let secrets = store.get_or_create(&key("secrets", "DEVELOPMENT")).await.unwrap();

    api.refresh(&cpu(80.0)).unwrap();

    assert!(secrets.current().is_none());
    assert_eq!(api.history(), vec![80.0]);
    assert_eq!(api.backend(), backend_descriptor("api", "DEVELOPMENT"));
}

#[tokio::test]
async fn driver_feeds_observers_until_teardown() {
    let store = store();
    let source = Arc::new(StaticMetricsSource::new());
    let key = key("api", "LOCAL-SANDBOX");
    source.set(key.clone(), cpu(35.0)).await;

    let context = store
        .spawn_driver(&key, source.clone(), Duration::from_millis(10))
        .await
        .unwrap();
    let rounds = Arc::new(AtomicUsize::new(0));
    {
        let rounds = Arc::clone(&rounds);
        context.subscribe_fn("rounds", move |_| {
            rounds.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
    }

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert!(rounds.load(Ordering::SeqCst) >= 1);
    assert_eq!(context.current().unwrap().score, 35.0);

    assert!(store.teardown(&key).await);
    let seen = rounds.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(40)).await;
    assert_eq!(rounds.load(Ordering::SeqCst), seen);
    assert!(context.refresh(&cpu(10.0)).is_err());
}

#[tokio::test]
async fn unavailable_source_leaves_context_empty() {
    let store = store();
    let key = key("secrets", "ENTERPRISE");
    let context = store
        .spawn_driver(&key, Arc::new(StaticMetricsSource::new()), Duration::from_millis(10))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(40)).await;

    assert!(context.current().is_none());
    assert!(store.has_driver(&key).await);
    store.teardown_all().await;
}

#[test]
fn unknown_lookup_degrades_gracefully() {
    let backend = backend_descriptor("telemetry", "MOON");
    assert_eq!(backend.name, "unknown");
    assert_eq!(backend.status, ConnectionStatus::Disconnected);
}

/// Custom sources plug in through the port.
struct RampSource {
    step: AtomicUsize,
}

#[async_trait]
impl tension_engine::ports::MetricsSource for RampSource {
    async fn collect(
        &self,
        _key: &ContextKey,
    ) -> Result<MetricBag, tension_engine::ports::MetricsSourceError> {
        let step = self.step.fetch_add(1, Ordering::SeqCst) as f64;
        Ok(cpu((step * 10.0).min(100.0)))
    }
}

#[tokio::test]
async fn tick_uses_custom_source() {
    let store = store();
    let context = store.get_or_create(&key("api", "ENTERPRISE")).await.unwrap();
    let source = RampSource {
        step: AtomicUsize::new(0),
    };

    let first = context.tick(&source).await.unwrap();
    let second = context.tick(&source).await.unwrap();

    assert_eq!(first.score, 0.0);
    assert_eq!(second.score, 10.0);
    assert_eq!(second.trend, Trend::Degrading);
}
