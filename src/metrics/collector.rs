// src/metrics/collector.rs
use crate::health::{CheckResult, CheckScope, CheckStatus};
use anyhow::Result;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;
use std::time::Duration;

pub struct MetricsRegistry {
    registry: Registry,
    collector: Arc<MetricsCollector>,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let collector = Arc::new(MetricsCollector::new(&registry)?);

        Ok(Self {
            registry,
            collector,
        })
    }

    pub fn collector(&self) -> Arc<MetricsCollector> {
        self.collector.clone()
    }

    pub fn gather(&self) -> Vec<u8> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
            tracing::error!("failed to encode metrics: {}", e);
        }
        buffer
    }
}

pub struct MetricsCollector {
    // Evaluation metrics
    pub evaluations_total: IntCounterVec,
    pub evaluation_duration_seconds: HistogramVec,

    // Per-check metrics
    pub check_up: IntGaugeVec,
    pub probe_duration_seconds: HistogramVec,

    // System metrics
    pub checks_registered: IntGauge,
}

impl MetricsCollector {
    pub fn new(registry: &Registry) -> Result<Self> {
        let evaluations_total = IntCounterVec::new(
            Opts::new("health_evaluations_total", "Total health evaluations"),
            &["scope", "status"],
        )?;
        registry.register(Box::new(evaluations_total.clone()))?;

        let evaluation_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "health_evaluation_duration_seconds",
                "Health evaluation duration in seconds",
            ),
            &["scope"],
        )?;
        registry.register(Box::new(evaluation_duration_seconds.clone()))?;

        let check_up = IntGaugeVec::new(
            Opts::new(
                "health_check_up",
                "Last observed check status (1=up, 0=down or unknown)",
            ),
            &["check"],
        )?;
        registry.register(Box::new(check_up.clone()))?;

        let probe_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "health_probe_duration_seconds",
                "Probe duration in seconds, timeouts included",
            ),
            &["check"],
        )?;
        registry.register(Box::new(probe_duration_seconds.clone()))?;

        let checks_registered =
            IntGauge::new("health_checks_registered", "Number of registered checks")?;
        registry.register(Box::new(checks_registered.clone()))?;

        Ok(Self {
            evaluations_total,
            evaluation_duration_seconds,
            check_up,
            probe_duration_seconds,
            checks_registered,
        })
    }

    pub fn observe_evaluation(&self, scope: CheckScope, status: CheckStatus, duration: Duration) {
        let scope = scope.to_string();
        self.evaluations_total
            .with_label_values(&[&scope, &status.to_string()])
            .inc();

        self.evaluation_duration_seconds
            .with_label_values(&[&scope])
            .observe(duration.as_secs_f64());
    }

    pub fn observe_check(&self, result: &CheckResult) {
        let value = if result.status.is_up() { 1 } else { 0 };
        self.check_up
            .with_label_values(&[&result.name])
            .set(value);

        if let Some(latency_ms) = result.latency_ms {
            self.probe_duration_seconds
                .with_label_values(&[&result.name])
                .observe(latency_ms as f64 / 1000.0);
        }
    }

    pub fn set_registered_checks(&self, count: usize) {
        self.checks_registered.set(count as i64);
    }
}
