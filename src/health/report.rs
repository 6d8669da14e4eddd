// src/health/report.rs
use super::status::CheckStatus;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Result of one probe invocation. Built once, folded into a report,
/// never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl CheckResult {
    pub fn new(
        name: impl Into<String>,
        status: CheckStatus,
        message: impl Into<String>,
        latency: Option<Duration>,
    ) -> Self {
        Self {
            name: name.into(),
            status,
            message: message.into(),
            latency_ms: latency.map(|d| d.as_millis() as u64),
        }
    }
}

/// Snapshot produced by one `evaluate` call. Owned by the caller that
/// requested it; one report backs exactly one HTTP response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: CheckStatus,
    pub message: String,
    pub checks: Vec<CheckResult>,
    pub checked_at: DateTime<Utc>,
}

impl HealthReport {
    pub fn is_up(&self) -> bool {
        self.status.is_up()
    }
}
