//! End-to-end tests of the registry endpoint group through the router.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use futures::future::join_all;
use registry_common::{ErrorBody, HealthReport, ServiceError, VersionSet};
use registry_server::checks::{ClusterHealthChecker, ReadinessChecker, VersionSource};
use registry_server::{build_router, AppState, RegistryEndpoint, RequestContext};
use serde_json::{json, Value};
use tower::ServiceExt;

struct CountingVersion {
    calls: Arc<AtomicUsize>,
}

impl VersionSource for CountingVersion {
    fn version_set(&self) -> VersionSet {
        self.calls.fetch_add(1, Ordering::SeqCst);
        VersionSet {
            version: "1.2.3".to_string(),
            ..Default::default()
        }
    }
}

struct StubHealth(Result<HealthReport, ServiceError>);

#[async_trait]
impl ClusterHealthChecker for StubHealth {
    async fn cluster_health(&self, _ctx: &RequestContext) -> Result<HealthReport, ServiceError> {
        self.0.clone()
    }
}

struct StubReadiness(Result<(), ServiceError>);

#[async_trait]
impl ReadinessChecker for StubReadiness {
    async fn readiness(&self, _ctx: &RequestContext) -> Result<(), ServiceError> {
        self.0.clone()
    }
}

/// Health check that only finishes when its request is cancelled
struct WaitForCancel;

#[async_trait]
impl ClusterHealthChecker for WaitForCancel {
    async fn cluster_health(&self, ctx: &RequestContext) -> Result<HealthReport, ServiceError> {
        ctx.run(std::future::pending()).await
    }
}

struct Harness {
    app: Router,
    version_calls: Arc<AtomicUsize>,
}

fn harness(health: impl ClusterHealthChecker + 'static, ready: impl ReadinessChecker + 'static) -> Harness {
    harness_with_state(health, ready, |state| state)
}

fn harness_with_state(
    health: impl ClusterHealthChecker + 'static,
    ready: impl ReadinessChecker + 'static,
    configure: impl FnOnce(AppState) -> AppState,
) -> Harness {
    let version_calls = Arc::new(AtomicUsize::new(0));
    let endpoint = RegistryEndpoint::new(
        Arc::new(CountingVersion {
            calls: version_calls.clone(),
        }),
        Arc::new(health),
        Arc::new(ready),
    );

    Harness {
        app: build_router(configure(AppState::new(endpoint))),
        version_calls,
    }
}

fn healthy() -> Harness {
    harness(
        StubHealth(Ok(HealthReport::from(json!({ "status": "UP" })))),
        StubReadiness(Ok(())),
    )
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn version_payload_shape() {
    let h = healthy();

    let (status, body) = get(&h.app, "/v4/demo/registry/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, br#"{"version":"1.2.3","apiVersion":"4.0.0"}"#);
}

#[tokio::test]
async fn version_is_served_as_json_without_caching_headers() {
    let h = healthy();

    let response = h
        .app
        .clone()
        .oneshot(
            Request::get("/v4/demo/registry/version")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
}

#[tokio::test]
async fn version_is_serialized_once_across_sequential_calls() {
    let h = healthy();

    let mut bodies = Vec::new();
    for project in ["demo", "default", "other"] {
        let (status, body) = get(&h.app, &format!("/v4/{project}/registry/version")).await;
        assert_eq!(status, StatusCode::OK);
        bodies.push(body);
    }

    assert!(bodies.iter().all(|b| b == &bodies[0]));
    assert_eq!(h.version_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn version_is_serialized_once_under_concurrent_first_access() {
    let h = healthy();

    let requests = (0..64).map(|_| {
        let app = h.app.clone();
        tokio::spawn(async move { get(&app, "/v4/demo/registry/version").await })
    });
    let results: Vec<(StatusCode, Vec<u8>)> = join_all(requests)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(h.version_calls.load(Ordering::SeqCst), 1);
    for (status, body) in &results {
        assert_eq!(*status, StatusCode::OK);
        assert_eq!(body, &results[0].1);
        serde_json::from_slice::<Value>(body).unwrap();
    }
}

#[tokio::test]
async fn health_success_returns_report() {
    let h = healthy();

    let (status, body) = get(&h.app, "/v4/demo/registry/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, br#"{"status":"UP"}"#);
}

#[tokio::test]
async fn health_failure_is_translated() {
    let h = harness(
        StubHealth(Err(ServiceError::unavailable("backend unreachable"))),
        StubReadiness(Ok(())),
    );

    let (status, body) = get(&h.app, "/v4/demo/registry/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let body: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert_eq!(body.error_code, 503001);
    assert_eq!(body.error_message, "backend unreachable");
}

#[tokio::test]
async fn readiness_success_is_empty_200() {
    let h = healthy();

    let (status, body) = get(&h.app, "/v4/demo/registry/health/readiness").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn readiness_failure_matches_health_translation() {
    let err = ServiceError::unavailable("not ready").with_detail("warming up");
    let h = harness(StubHealth(Err(err.clone())), StubReadiness(Err(err)));

    let (ready_status, ready_body) = get(&h.app, "/v4/demo/registry/health/readiness").await;
    let (health_status, health_body) = get(&h.app, "/v4/demo/registry/health").await;

    assert_eq!(ready_status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(ready_status, health_status);
    assert_eq!(ready_body, health_body);

    let body: ErrorBody = serde_json::from_slice(&ready_body).unwrap();
    assert_eq!(body.detail.as_deref(), Some("warming up"));
}

#[tokio::test(start_paused = true)]
async fn health_check_past_deadline_times_out() {
    let h = harness_with_state(WaitForCancel, StubReadiness(Ok(())), |state| {
        state.with_request_timeout(Some(Duration::from_millis(100)))
    });

    let (status, body) = get(&h.app, "/v4/demo/registry/health").await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);

    let body: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert_eq!(body.error_code, 504001);
}

#[tokio::test]
async fn health_check_during_shutdown_is_cancelled() {
    let shutdown = tokio_util::sync::CancellationToken::new();
    let token = shutdown.clone();
    let h = harness_with_state(WaitForCancel, StubReadiness(Ok(())), move |state| {
        state.with_shutdown(token)
    });
    shutdown.cancel();

    let (status, _) = get(&h.app, "/v4/demo/registry/health").await;
    assert_eq!(status.as_u16(), 499);
}

#[tokio::test]
async fn unknown_path_is_404() {
    let h = healthy();

    let (status, _) = get(&h.app, "/v4/demo/registry/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test]
fn route_table_order() {
    let paths: Vec<&str> = RegistryEndpoint::url_patterns()
        .iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(
        paths,
        [
            "/v4/:project/registry/version",
            "/v4/:project/registry/health",
            "/v4/:project/registry/health/readiness",
        ]
    );
    assert!(RegistryEndpoint::url_patterns()
        .iter()
        .all(|r| r.method == axum::http::Method::GET));
}
