//! Demo binary: scores a sample context once and prints the update as JSON.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use tension_engine::adapters::{InMemoryContextStore, StaticMetricsSource};
use tension_engine::config::AppConfig;
use tension_engine::domain::foundation::ContextKey;
use tension_engine::domain::tension::{MetricBag, MetricKind};
use tension_engine::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load_from(&path)
            .with_context(|| format!("Failed to load configuration from {path}"))?,
        None => AppConfig::load().context("Failed to load configuration")?,
    };
    config.validate().context("Invalid configuration")?;
    init_tracing(&config.telemetry)?;

    let store = InMemoryContextStore::new(config.analyzer.clone())?;
    let key = ContextKey::new("api", "DEVELOPMENT", "localhost")?;

    let sample = MetricBag::new()
        .with(MetricKind::ErrorRate, 0.02)
        .with(MetricKind::Latency, 150.0)
        .with(MetricKind::MemoryUsage, 45.0)
        .with(MetricKind::CpuUsage, 30.0)
        .with(MetricKind::QueueDepth, 2.0)
        .with(MetricKind::CacheHitRate, 0.85);
    let source = StaticMetricsSource::with_fallback(sample);

    let context = store.get_or_create(&key).await?;
    context.subscribe_fn("log", |update| {
        info!(key = %update.key, score = update.score, hex = update.hex(), "Tension update");
        Ok(())
    });

    let update = context.tick(&source).await?;
    println!("{}", serde_json::to_string_pretty(&update)?);
    println!("{}", serde_json::to_string_pretty(&context.backend())?);

    store
        .spawn_driver(&key, Arc::new(source), config.refresh.interval())
        .await?;
    info!(key = %key, "Driver running, press Ctrl-C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    store.teardown_all().await;
    Ok(())
}
