//! Client Registry Integration Tests
//!
//! These tests serve the full router on an ephemeral port and drive it over real
//! HTTP, both with raw requests and through the HTTP client transport.

use client_registry::config::{Config, ErrorStatusMapping};
use client_registry::endpoint::Endpoints;
use client_registry::errors::ServiceError;
use client_registry::http::{AppState, HttpClientService, build_router};
use client_registry::registry::{Client, ClientService, chain, logging_middleware, new_service};
use client_registry::storage::inmemory::MemoryClientStore;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serve a fresh registry and return its base URL.
async fn spawn_registry(error_status_mapping: ErrorStatusMapping) -> String {
    let service = new_service(Arc::new(MemoryClientStore::new()))
        .await
        .unwrap();

    let config = Arc::new(Config {
        version: "test".to_string(),
        http_port: "0".to_string().try_into().unwrap(),
        storage_backend: "memory".to_string(),
        database_url: None,
        storage_timeout: "5s".to_string().try_into().unwrap(),
        error_status_mapping,
    });

    let app = build_router(AppState {
        config,
        endpoints: Endpoints::new(service),
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn demo_client() -> Client {
    Client {
        name: "demo".to_string(),
        redirect_uri: "https://x/cb".to_string(),
        grant_type: "authorization_code".to_string(),
        response_type: "code".to_string(),
        scope: "read".to_string(),
        public: false,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_client_lifecycle_over_http() {
    let base_url = spawn_registry(ErrorStatusMapping::Collapsed).await;
    let http = reqwest::Client::new();

    // Step 1: Create
    let response = http
        .post(format!("{}/api/v0/clients", base_url))
        .json(&json!({
            "name": "demo",
            "redirectUri": "https://x/cb",
            "grantType": "authorization_code",
            "responseType": "code",
            "scope": "read",
            "public": false
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/json; charset=utf-8"
    );
    let body: Value = response.json().await.unwrap();
    let created = body["client"].clone();
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert!(!created["secret"].as_str().unwrap().is_empty());

    // Step 2: Read back the same record, secret included
    let response = http
        .get(format!("{}/api/v0/clients/{}", base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["client"], created);

    // Step 3: Delete
    let response = http
        .delete(format!("{}/api/v0/clients/{}", base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    // Step 4: The record is gone and the failure uses the error envelope
    let response = http
        .get(format!("{}/api/v0/clients/{}", base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.status(),
        reqwest::StatusCode::INTERNAL_SERVER_ERROR
    );
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Client not found"));
    assert_eq!(body.as_object().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_id_segment_is_a_router_404() {
    let base_url = spawn_registry(ErrorStatusMapping::Collapsed).await;

    let response = reqwest::get(format!("{}/api/v0/clients/", base_url))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_http_client_transport_round_trip() {
    let base_url = spawn_registry(ErrorStatusMapping::Collapsed).await;
    let remote = HttpClientService::new(reqwest::Client::new(), &base_url);

    let created = remote.create_client(demo_client()).await.unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.secret.len(), 64);
    assert_eq!(created.name, "demo");

    let fetched = remote.get_client(&created.id).await.unwrap();
    assert_eq!(fetched, created);

    remote.delete_client(&created.id).await.unwrap();
    remote.delete_client(&created.id).await.unwrap();

    let err = remote.get_client(&created.id).await.unwrap_err();
    match err {
        ServiceError::Remote { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains(&created.id));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_http_client_transport_maps_not_found_with_per_kind_statuses() {
    let base_url = spawn_registry(ErrorStatusMapping::PerKind).await;
    let remote = HttpClientService::new(reqwest::Client::new(), &base_url);

    let err = remote.get_client("does-not-exist").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_logging_middleware_wraps_remote_service() {
    let base_url = spawn_registry(ErrorStatusMapping::Collapsed).await;
    let remote: Arc<dyn ClientService> =
        Arc::new(HttpClientService::new(reqwest::Client::new(), &base_url));
    let logged = chain(remote, [logging_middleware()]);

    let created = logged.create_client(demo_client()).await.unwrap();
    assert_eq!(logged.get_client(&created.id).await.unwrap(), created);
}

#[tokio::test]
async fn test_unreachable_registry_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let remote = HttpClientService::new(reqwest::Client::new(), &format!("http://{}", addr));
    let err = remote.get_client("any").await.unwrap_err();
    assert!(matches!(err, ServiceError::Transport(_)));
}

#[tokio::test]
async fn test_http_client_transport_never_retargets_client_ids() {
    let base_url = spawn_registry(ErrorStatusMapping::PerKind).await;
    let remote = HttpClientService::new(reqwest::Client::new(), &base_url);

    let created = remote.create_client(demo_client()).await.unwrap();

    // A path-like id must not resolve to another client's record.
    let err = remote
        .get_client(&format!("nope/../{}", created.id))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    // Ids that cannot exist are absent, and deleting them succeeds.
    remote.delete_client("..").await.unwrap();
    remote.delete_client(".").await.unwrap();
    assert!(matches!(
        remote.get_client("..").await,
        Err(ServiceError::NotFound(_))
    ));

    // Query and fragment characters stay inside the id.
    remote
        .delete_client(&format!("{}?force=true", created.id))
        .await
        .unwrap();
    remote
        .delete_client(&format!("{}#frag", created.id))
        .await
        .unwrap();
    assert_eq!(remote.get_client(&created.id).await.unwrap(), created);

    remote.delete_client(&created.id).await.unwrap();
    assert!(matches!(
        remote.get_client(&created.id).await,
        Err(ServiceError::NotFound(_))
    ));
}
