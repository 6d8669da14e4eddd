// src/api/mod.rs
mod endpoints;

pub use endpoints::{ApiError, HealthApi, LIVENESS_PATH, READINESS_PATH};
