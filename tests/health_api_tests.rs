// tests/health_api_tests.rs
use hyper::{Body, Method, Request, StatusCode};
use rust_health_service::api::{HealthApi, LIVENESS_PATH, READINESS_PATH};
use rust_health_service::config::HealthCheckConfig;
use rust_health_service::health::{
    CheckRegistry, CheckScope, FnProbe, HealthAggregator, Probe, ProbeOutcome,
};
use std::sync::Arc;

fn api_for(registry: CheckRegistry) -> HealthApi {
    let aggregator = Arc::new(HealthAggregator::new(
        Arc::new(registry),
        HealthCheckConfig::default(),
        None,
    ));
    HealthApi::new(aggregator)
}

fn always_up() -> Arc<dyn Probe> {
    Arc::new(FnProbe::new(|| async { Ok(ProbeOutcome::up("ok")) }))
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: hyper::Response<Body>) -> serde_json::Value {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn liveness_with_one_up_probe_returns_200_up() {
    let mut registry = CheckRegistry::new();
    registry
        .register("self", CheckScope::Liveness, always_up())
        .unwrap();

    let response = api_for(registry).handle(get(LIVENESS_PATH)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/json"
    );

    let body = body_json(response).await;
    assert_eq!(body["status"], "UP");
    assert_eq!(body["message"], "Application is alive");
    // Liveness carries no per-check detail.
    assert!(body.get("checks").is_none());
}

#[tokio::test]
async fn liveness_with_no_checks_is_vacuously_up() {
    let response = api_for(CheckRegistry::new())
        .handle(get(LIVENESS_PATH))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "UP");
}

#[tokio::test]
async fn readiness_with_failing_probe_returns_503_with_detail() {
    let mut registry = CheckRegistry::new();
    registry
        .register(
            "database",
            CheckScope::Readiness,
            Arc::new(FnProbe::new(|| async {
                Err(anyhow::anyhow!("connection refused"))
            })),
        )
        .unwrap();

    let response = api_for(registry).handle(get(READINESS_PATH)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["status"], "DOWN");
    assert_eq!(body["checks"][0]["name"], "database");
    assert_eq!(body["checks"][0]["status"], "DOWN");
    assert!(body["checks"][0]["message"]
        .as_str()
        .unwrap()
        .contains("connection refused"));
}

#[tokio::test]
async fn readiness_with_all_up_probes_returns_200() {
    let mut registry = CheckRegistry::new();
    registry
        .register("database", CheckScope::Readiness, always_up())
        .unwrap();
    registry
        .register("cache", CheckScope::Readiness, always_up())
        .unwrap();

    let response = api_for(registry).handle(get(READINESS_PATH)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "UP");
    assert_eq!(body["message"], "Application is ready");
    assert_eq!(body["checks"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn readiness_ignores_liveness_checks() {
    let mut registry = CheckRegistry::new();
    registry
        .register("self", CheckScope::Liveness, always_up())
        .unwrap();

    let response = api_for(registry).handle(get(READINESS_PATH)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["checks"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_path_is_404() {
    let response = api_for(CheckRegistry::new())
        .handle(get("/api/v1/health/startup"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_get_on_health_path_is_405() {
    let request = Request::builder()
        .method(Method::POST)
        .uri(READINESS_PATH)
        .body(Body::empty())
        .unwrap();

    let response = api_for(CheckRegistry::new()).handle(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
