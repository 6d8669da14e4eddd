// src/health/status.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single check, or of a whole report once folded.
/// The aggregator never produces an `Unknown` overall status; that
/// variant exists only for individual checks (timeouts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Up,
    Down,
    Unknown,
}

impl CheckStatus {
    pub fn is_up(&self) -> bool {
        matches!(self, CheckStatus::Up)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Up => write!(f, "UP"),
            CheckStatus::Down => write!(f, "DOWN"),
            CheckStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Which probe set an evaluation targets. Liveness checks are cheap
/// self-tests; readiness checks may reach external dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckScope {
    Liveness,
    Readiness,
}

impl fmt::Display for CheckScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckScope::Liveness => write!(f, "liveness"),
            CheckScope::Readiness => write!(f, "readiness"),
        }
    }
}
