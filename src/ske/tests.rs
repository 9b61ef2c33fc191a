//! Tests for cluster operations and wait handlers

use super::*;
use crate::config::SdkConfig;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig};
use crate::service::Service;
use crate::types::ServiceKind;
use crate::wait::Progress;
use serde_json::json;
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cluster_with_state(state: &str) -> Cluster {
    serde_json::from_value(json!({
        "name": "prod",
        "status": {"aggregated": state}
    }))
    .unwrap()
}

fn service_for(server: &MockServer) -> Service {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(0)
        .no_rate_limit()
        .build();
    Service::new(ServiceKind::Ske, HttpClient::with_config(config))
}

// ============================================================================
// Classification Tests
// ============================================================================

#[test_case(STATE_HEALTHY, true ; "healthy")]
#[test_case(STATE_HIBERNATED, true ; "hibernated")]
#[test_case(STATE_CREATING, false ; "creating")]
#[test_case(STATE_RECONCILING, false ; "reconciling")]
#[test_case(STATE_HIBERNATING, false ; "hibernating")]
#[test_case(STATE_WAKINGUP, false ; "waking up")]
#[test_case(STATE_UNSPECIFIED, false ; "unspecified")]
fn test_cluster_ready_progress(state: &str, done: bool) {
    let progress = cluster_ready_progress("prod", Ok(cluster_with_state(state))).unwrap();
    assert_eq!(progress.is_done(), done);
}

#[test]
fn test_cluster_ready_progress_without_status_is_pending() {
    let progress = cluster_ready_progress("prod", Ok(Cluster::default())).unwrap();
    assert_eq!(progress, Progress::Pending);
}

#[test]
fn test_cluster_ready_progress_unhealthy_reports_errors() {
    let cluster: Cluster = serde_json::from_value(json!({
        "name": "prod",
        "status": {
            "aggregated": STATE_UNHEALTHY,
            "errors": [
                {"code": "SKE_QUOTA_EXCEEDED", "message": "not enough vCPUs"},
                {"message": "nodes not ready"}
            ]
        }
    }))
    .unwrap();

    let err = cluster_ready_progress("prod", Ok(cluster)).unwrap_err();
    assert!(matches!(err, Error::ResourceFailed { .. }));
    assert_eq!(
        err.to_string(),
        "cluster 'prod' failed: SKE_QUOTA_EXCEEDED: not enough vCPUs; nodes not ready"
    );
}

#[test]
fn test_cluster_ready_progress_unhealthy_without_errors() {
    let err = cluster_ready_progress("prod", Ok(cluster_with_state(STATE_UNHEALTHY))).unwrap_err();
    assert!(err.to_string().contains("cluster is unhealthy"));
}

#[test]
fn test_cluster_ready_progress_propagates_lookup_error() {
    let err = cluster_ready_progress("prod", Err(Error::http_status(404, ""))).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_cluster_deleted_progress() {
    assert_eq!(
        cluster_deleted_progress(Ok(cluster_with_state(STATE_DELETING))).unwrap(),
        Progress::Pending
    );
    assert_eq!(
        cluster_deleted_progress(Err(Error::http_status(404, ""))).unwrap(),
        Progress::Done(())
    );
    assert_eq!(
        cluster_deleted_progress(Err(Error::http_status(410, ""))).unwrap(),
        Progress::Done(())
    );
    assert!(cluster_deleted_progress(Err(Error::http_status(403, "forbidden"))).is_err());
}

#[test]
fn test_cluster_keeps_unknown_fields() {
    let cluster: Cluster = serde_json::from_value(json!({
        "name": "prod",
        "kubernetes": {"version": "1.29"},
        "maintenance": {"autoUpdate": {"kubernetesVersion": true}}
    }))
    .unwrap();

    assert_eq!(cluster.kubernetes.as_ref().unwrap().version, "1.29");
    assert!(cluster.extra.contains_key("maintenance"));
    assert!(cluster.aggregated_state().is_none());
}

// ============================================================================
// API Tests
// ============================================================================

#[tokio::test]
async fn test_create_or_update_cluster() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v1/projects/p1/clusters/prod"))
        .and(body_partial_json(json!({"kubernetes": {"version": "1.29"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "prod",
            "status": {"aggregated": STATE_CREATING}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = ClusterPayload {
        kubernetes: Kubernetes {
            version: "1.29".to_string(),
        },
        ..ClusterPayload::default()
    };
    let cluster = service_for(&server)
        .create_or_update_cluster("p1", "prod", &payload)
        .await
        .unwrap();

    assert_eq!(cluster.aggregated_state(), Some(STATE_CREATING));
}

#[tokio::test]
async fn test_delete_cluster() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/projects/p1/clusters/prod"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    service_for(&server)
        .delete_cluster("p1", "prod")
        .await
        .unwrap();
}

// ============================================================================
// Wait Handler Tests
// ============================================================================

#[tokio::test]
async fn test_create_wait_handler_defaults() {
    let waiter = create_or_update_cluster_wait_handler(
        Service::new(ServiceKind::Ske, HttpClient::new()),
        "p1",
        "prod",
    );
    assert_eq!(waiter.timeout(), CLUSTER_WAIT_TIMEOUT);
}

#[tokio::test]
async fn test_create_wait_handler_waits_for_healthy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/p1/clusters/prod"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "prod",
            "status": {"aggregated": STATE_CREATING}
        })))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/p1/clusters/prod"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "prod",
            "status": {"aggregated": STATE_HEALTHY}
        })))
        .mount(&server)
        .await;

    let mut waiter = create_or_update_cluster_wait_handler(service_for(&server), "p1", "prod");
    waiter
        .set_throttle(Duration::from_millis(20))
        .set_timeout(Duration::from_secs(5));

    let cluster = waiter.wait().await.unwrap();
    assert_eq!(cluster.name.as_deref(), Some("prod"));
    assert_eq!(cluster.aggregated_state(), Some(STATE_HEALTHY));
}

#[tokio::test]
async fn test_create_wait_handler_unhealthy_fails_fast() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/p1/clusters/prod"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "prod",
            "status": {
                "aggregated": STATE_UNHEALTHY,
                "errors": [{"code": "SKE_INFRA_ERROR", "message": "network setup failed"}]
            }
        })))
        .mount(&server)
        .await;

    let mut waiter = create_or_update_cluster_wait_handler(service_for(&server), "p1", "prod");
    waiter
        .set_throttle(Duration::from_millis(20))
        .set_timeout(Duration::from_secs(30));

    let start = std::time::Instant::now();
    let err = waiter.wait().await.unwrap_err();

    assert!(err.to_string().contains("network setup failed"));
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_delete_wait_handler_until_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/p1/clusters/prod"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "prod",
            "status": {"aggregated": STATE_DELETING}
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/p1/clusters/prod"))
        .respond_with(ResponseTemplate::new(404).set_body_string("cluster not found"))
        .mount(&server)
        .await;

    let mut waiter = delete_cluster_wait_handler(service_for(&server), "p1", "prod");
    waiter.set_throttle(Duration::from_millis(20));

    waiter.wait().await.unwrap();
}

#[tokio::test]
async fn test_delete_wait_handler_propagates_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/p1/clusters/prod"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let mut waiter = delete_cluster_wait_handler(service_for(&server), "p1", "prod");
    waiter.set_throttle(Duration::from_millis(20));

    let err = waiter.wait().await.unwrap_err();
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn test_wait_handler_polls_once_per_attempt_despite_retry_budget() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/projects/p1/clusters/prod"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    // three retries are configured for ordinary requests
    let config = SdkConfig::from_yaml_str(&format!(
        "endpoints:\n  ske: {}\nhttp:\n  initial_backoff_ms: 1\n  rate_limit: null\n",
        server.uri()
    ))
    .unwrap();
    assert_eq!(config.http.max_retries, 3);
    let ske = Service::from_config(ServiceKind::Ske, &config).unwrap();

    let mut waiter = create_or_update_cluster_wait_handler(ske.clone(), "p1", "prod");
    waiter.set_throttle(Duration::from_millis(20));

    let err = waiter.wait().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);

    // a direct lookup still uses the retry budget
    let err = ske.get_cluster("p1", "prod").await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(server.received_requests().await.unwrap().len(), 5);
}
