//! Tests for database instance operations and wait handlers

use super::*;
use crate::error::Error;
use crate::http::{HttpClient, HttpClientConfig};
use crate::service::Service;
use crate::types::ServiceKind;
use crate::wait::{Progress, WaitConfig};
use serde_json::json;
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INSTANCE_PATH: &str = "/v1/projects/p1/instances/db1";

fn instance(kind: &str, state: &str) -> Instance {
    Instance {
        instance_id: Some("db1".to_string()),
        last_operation: Some(LastOperation {
            kind: kind.to_string(),
            state: state.to_string(),
            description: None,
        }),
        ..Instance::default()
    }
}

fn instance_json(kind: &str, state: &str, description: &str) -> serde_json::Value {
    json!({
        "instanceId": "db1",
        "name": "orders",
        "lastOperation": {"type": kind, "state": state, "description": description}
    })
}

fn service_for(server: &MockServer) -> Service {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(0)
        .no_rate_limit()
        .build();
    Service::new(ServiceKind::Database, HttpClient::with_config(config)).with_wait_config(
        WaitConfig {
            timeout_secs: Some(5),
            throttle_ms: Some(20),
        },
    )
}

// ============================================================================
// Classification Tests
// ============================================================================

#[test_case(OPERATION_TYPE_CREATE, OPERATION_STATE_SUCCEEDED, true ; "create succeeded")]
#[test_case(OPERATION_TYPE_CREATE, OPERATION_STATE_IN_PROGRESS, false ; "create in progress")]
#[test_case(OPERATION_TYPE_UPDATE, OPERATION_STATE_SUCCEEDED, false ; "other operation type")]
fn test_instance_operation_progress(kind: &str, state: &str, done: bool) {
    let progress =
        instance_operation_progress("db1", OPERATION_TYPE_CREATE, instance(kind, state)).unwrap();
    assert_eq!(progress.is_done(), done);
}

#[test]
fn test_instance_operation_progress_without_operation() {
    let progress =
        instance_operation_progress("db1", OPERATION_TYPE_CREATE, Instance::default()).unwrap();
    assert_eq!(progress, Progress::Pending);
}

#[test]
fn test_instance_operation_progress_failed() {
    let mut failed = instance(OPERATION_TYPE_UPDATE, OPERATION_STATE_FAILED);
    failed.last_operation.as_mut().unwrap().description = Some("disk quota exceeded".to_string());

    let err = instance_operation_progress("db1", OPERATION_TYPE_UPDATE, failed).unwrap_err();
    assert_eq!(err.to_string(), "instance 'db1' failed: disk quota exceeded");
}

#[test]
fn test_instance_operation_progress_failed_without_description() {
    let err = instance_operation_progress(
        "db1",
        OPERATION_TYPE_CREATE,
        instance(OPERATION_TYPE_CREATE, OPERATION_STATE_FAILED),
    )
    .unwrap_err();
    assert!(err.to_string().contains("create operation failed"));
}

#[test]
fn test_instance_deleted_progress() {
    assert_eq!(
        instance_deleted_progress(
            "db1",
            Ok(instance(OPERATION_TYPE_DELETE, OPERATION_STATE_IN_PROGRESS))
        )
        .unwrap(),
        Progress::Pending
    );
    assert_eq!(
        instance_deleted_progress("db1", Err(Error::http_status(404, ""))).unwrap(),
        Progress::Done(())
    );
    assert_eq!(
        instance_deleted_progress("db1", Err(Error::http_status(410, ""))).unwrap(),
        Progress::Done(())
    );

    let err = instance_deleted_progress(
        "db1",
        Ok(instance(OPERATION_TYPE_DELETE, OPERATION_STATE_FAILED)),
    )
    .unwrap_err();
    assert!(matches!(err, Error::ResourceFailed { .. }));
}

#[test]
fn test_instance_deserialize() {
    let instance: Instance =
        serde_json::from_value(instance_json("create", "in progress", "provisioning")).unwrap();
    let last = instance.last_operation.unwrap();
    assert_eq!(last.kind, OPERATION_TYPE_CREATE);
    assert_eq!(last.state, OPERATION_STATE_IN_PROGRESS);
    assert_eq!(instance.name.as_deref(), Some("orders"));
}

// ============================================================================
// API Tests
// ============================================================================

#[tokio::test]
async fn test_create_instance() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/projects/p1/instances"))
        .and(body_json(json!({"instanceName": "orders", "planId": "small"})))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"instanceId": "db1"})))
        .expect(1)
        .mount(&server)
        .await;

    let payload = CreateInstancePayload {
        instance_name: "orders".to_string(),
        plan_id: "small".to_string(),
        ..CreateInstancePayload::default()
    };
    let response = service_for(&server)
        .create_instance("p1", &payload)
        .await
        .unwrap();

    assert_eq!(response.instance_id, "db1");
}

#[tokio::test]
async fn test_partial_update_instance() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path(INSTANCE_PATH))
        .and(body_json(json!({"planId": "large"})))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let payload = UpdateInstancePayload {
        plan_id: Some("large".to_string()),
        ..UpdateInstancePayload::default()
    };
    service_for(&server)
        .partial_update_instance("p1", "db1", &payload)
        .await
        .unwrap();
}

// ============================================================================
// Wait Handler Tests
// ============================================================================

#[test]
fn test_wait_handler_applies_service_wait_config() {
    let service = Service::new(ServiceKind::Database, HttpClient::new());
    let waiter = create_instance_wait_handler(service.clone(), "p1", "db1");
    assert_eq!(waiter.timeout(), INSTANCE_WAIT_TIMEOUT);

    let service = service.with_wait_config(WaitConfig {
        timeout_secs: Some(90),
        throttle_ms: None,
    });
    let waiter = delete_instance_wait_handler(service, "p1", "db1");
    assert_eq!(waiter.timeout(), Duration::from_secs(90));
}

#[tokio::test]
async fn test_create_wait_handler_not_found_then_succeeded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(INSTANCE_PATH))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(INSTANCE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(instance_json("create", "in progress", "")),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(INSTANCE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(instance_json("create", "succeeded", "")),
        )
        .mount(&server)
        .await;

    let instance = create_instance_wait_handler(service_for(&server), "p1", "db1")
        .wait()
        .await
        .unwrap();

    assert_eq!(instance.instance_id.as_deref(), Some("db1"));
}

#[tokio::test]
async fn test_create_wait_handler_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(INSTANCE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(instance_json(
            "create",
            "failed",
            "no capacity in zone",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let err = create_instance_wait_handler(service_for(&server), "p1", "db1")
        .wait()
        .await
        .unwrap_err();

    assert!(err.to_string().contains("no capacity in zone"));
}

#[tokio::test]
async fn test_update_wait_handler_not_found_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(INSTANCE_PATH))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = update_instance_wait_handler(service_for(&server), "p1", "db1")
        .wait()
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_wait_handler_until_gone() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(INSTANCE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(instance_json("delete", "in progress", "")),
        )
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(INSTANCE_PATH))
        .respond_with(ResponseTemplate::new(410))
        .mount(&server)
        .await;

    delete_instance_wait_handler(service_for(&server), "p1", "db1")
        .wait()
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_wait_handler_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(INSTANCE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(instance_json("update", "in progress", "")),
        )
        .mount(&server)
        .await;

    let mut waiter = update_instance_wait_handler(service_for(&server), "p1", "db1");
    waiter
        .set_timeout(Duration::from_millis(200))
        .set_throttle(Duration::from_millis(50));

    let err = waiter.wait().await.unwrap_err();
    assert!(err.is_wait_timeout());
}

#[tokio::test]
async fn test_delete_wait_handler_server_error_is_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(INSTANCE_PATH))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .max_retries(2)
        .backoff(Duration::from_millis(1), Duration::from_millis(1))
        .no_rate_limit()
        .build();
    let db = Service::new(ServiceKind::Database, HttpClient::with_config(config));

    let mut waiter = delete_instance_wait_handler(db, "p1", "db1");
    waiter.set_throttle(Duration::from_millis(20));

    let err = waiter.wait().await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}
