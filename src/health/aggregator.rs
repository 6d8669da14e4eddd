// src/health/aggregator.rs
use super::probes::Probe;
use super::registry::CheckRegistry;
use super::report::{CheckResult, HealthReport};
use super::status::{CheckScope, CheckStatus};
use crate::config::HealthCheckConfig;
use crate::metrics::MetricsCollector;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Runs the registered probes for a scope and folds their results into a
/// single report. Each `evaluate` call is a stateless snapshot; nothing
/// is cached between calls.
pub struct HealthAggregator {
    registry: Arc<CheckRegistry>,
    config: HealthCheckConfig,
    metrics: Option<Arc<MetricsCollector>>,
}

impl HealthAggregator {
    pub fn new(
        registry: Arc<CheckRegistry>,
        config: HealthCheckConfig,
        metrics: Option<Arc<MetricsCollector>>,
    ) -> Self {
        Self {
            registry,
            config,
            metrics,
        }
    }

    /// Evaluate every check registered under `scope`.
    ///
    /// Probes run as independent tokio tasks, each under the configured
    /// timeout and an optional concurrency cap. A probe that errors or
    /// times out becomes a DOWN/UNKNOWN result; it never fails the call
    /// or blocks its siblings. If the caller goes away mid-call the
    /// spawned tasks still run to completion and their results are
    /// dropped, so probes are never interrupted mid-flight.
    pub async fn evaluate(&self, scope: CheckScope) -> HealthReport {
        let eval_id = Uuid::new_v4();
        let started = Instant::now();
        let checks = self.registry.checks_for(scope);

        debug!(%eval_id, %scope, count = checks.len(), "starting health evaluation");

        let limit = self
            .config
            .max_concurrency
            .unwrap_or_else(|| checks.len().max(1));
        let semaphore = Arc::new(Semaphore::new(limit));
        let probe_timeout = self.config.timeout();

        let mut tasks = Vec::with_capacity(checks.len());
        for check in &checks {
            let name = check.name.clone();
            let probe = check.probe.clone();
            let semaphore = semaphore.clone();

            tasks.push(tokio::spawn(async move {
                // Holding a permit bounds fan-out; the timeout starts
                // once the probe actually runs.
                let _permit = semaphore.acquire_owned().await;
                run_probe(name, probe, probe_timeout).await
            }));
        }

        // Joining in spawn order keeps the report in registration order
        // regardless of completion order.
        let joined = futures::future::join_all(tasks).await;

        let mut results = Vec::with_capacity(checks.len());
        for (check, outcome) in checks.iter().zip(joined) {
            let result = match outcome {
                Ok(result) => result,
                Err(e) => CheckResult::new(
                    check.name.clone(),
                    CheckStatus::Down,
                    format!("probe task failed: {}", e),
                    None,
                ),
            };

            if !result.status.is_up() {
                warn!(%eval_id, check = %result.name, status = %result.status, "{}", result.message);
            }

            if let Some(metrics) = &self.metrics {
                metrics.observe_check(&result);
            }

            results.push(result);
        }

        let status = overall_status(&results);
        let message = report_message(scope, status, &results);

        if let Some(metrics) = &self.metrics {
            metrics.observe_evaluation(scope, status, started.elapsed());
        }

        info!(
            %eval_id, %scope, %status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "health evaluation complete"
        );

        HealthReport {
            status,
            message,
            checks: results,
            checked_at: Utc::now(),
        }
    }
}

async fn run_probe(name: String, probe: Arc<dyn Probe>, limit: Duration) -> CheckResult {
    let started = Instant::now();
    let outcome = timeout(limit, probe.run()).await;
    let latency = started.elapsed();

    match outcome {
        Ok(Ok(outcome)) => CheckResult::new(name, outcome.status, outcome.message, Some(latency)),
        Ok(Err(e)) => CheckResult::new(name, CheckStatus::Down, format!("{:#}", e), Some(latency)),
        Err(_) => CheckResult::new(name, CheckStatus::Unknown, "check timed out", Some(latency)),
    }
}

/// UP iff every check is UP; an empty set is vacuously UP. Any DOWN or
/// UNKNOWN check forces the aggregate DOWN.
pub(crate) fn overall_status(checks: &[CheckResult]) -> CheckStatus {
    if checks.iter().all(|c| c.status.is_up()) {
        CheckStatus::Up
    } else {
        CheckStatus::Down
    }
}

fn report_message(scope: CheckScope, status: CheckStatus, checks: &[CheckResult]) -> String {
    if status.is_up() {
        match scope {
            CheckScope::Liveness => "Application is alive".to_string(),
            CheckScope::Readiness => "Application is ready".to_string(),
        }
    } else {
        let failing = checks.iter().filter(|c| !c.status.is_up()).count();
        format!("{} of {} checks failing", failing, checks.len())
    }
}
