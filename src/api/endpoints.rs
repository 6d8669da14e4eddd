// src/api/endpoints.rs
use crate::health::{CheckScope, HealthAggregator};
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Method, Request, Response, StatusCode};
use serde_json::json;
use std::sync::Arc;

pub const LIVENESS_PATH: &str = "/api/v1/health/liveness";
pub const READINESS_PATH: &str = "/api/v1/health/readiness";

// Only JSON serialization or response assembly can fail here; a DOWN
// aggregate is a normal 503, never an error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("failed to encode response body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to build response: {0}")]
    Http(#[from] hyper::http::Error),
}

/// The two read-only health endpoints, backed by one aggregator.
pub struct HealthApi {
    aggregator: Arc<HealthAggregator>,
}

impl HealthApi {
    pub fn new(aggregator: Arc<HealthAggregator>) -> Self {
        Self { aggregator }
    }

    pub async fn handle(&self, req: Request<Body>) -> Result<Response<Body>, ApiError> {
        match req.uri().path() {
            LIVENESS_PATH | READINESS_PATH if req.method() != Method::GET => text(
                StatusCode::METHOD_NOT_ALLOWED,
                "Method Not Allowed",
            ),
            LIVENESS_PATH => self.liveness().await,
            READINESS_PATH => self.readiness().await,
            _ => text(StatusCode::NOT_FOUND, "Not Found"),
        }
    }

    /// Liveness answers "is the process alive"; per-check detail is
    /// omitted and the status code is always 200.
    async fn liveness(&self) -> Result<Response<Body>, ApiError> {
        let report = self.aggregator.evaluate(CheckScope::Liveness).await;
        let body = serde_json::to_vec(&json!({
            "status": report.status,
            "message": report.message,
        }))?;

        json_response(StatusCode::OK, body)
    }

    /// Readiness carries the full per-check report and maps a DOWN
    /// aggregate to 503 so orchestrators stop routing traffic here.
    async fn readiness(&self) -> Result<Response<Body>, ApiError> {
        let report = self.aggregator.evaluate(CheckScope::Readiness).await;
        let status = if report.is_up() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        let body = serde_json::to_vec(&report)?;

        json_response(status, body)
    }
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Result<Response<Body>, ApiError> {
    Ok(Response::builder()
        .status(status)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))?)
}

fn text(status: StatusCode, message: &'static str) -> Result<Response<Body>, ApiError> {
    Ok(Response::builder()
        .status(status)
        .body(Body::from(message))?)
}
