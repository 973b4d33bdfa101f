//! Integration tests for authentication and the single retry policy.
//!
//! The transport used here plays the server side of the token lifecycle: it
//! issues a new token on each login and rejects any request that does not
//! carry the token it issued last.

use async_trait::async_trait;
use kazoo_api::clients::{HttpResponse, TransportRequest};
use kazoo_api::rest::{OperationArgs, Registry};
use kazoo_api::{ApiKey, AuthState, KazooClient, KazooConfig, KazooError, Transport, TransportError};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
struct TokenServer {
    valid_token: Mutex<Option<String>>,
    logins: AtomicUsize,
    api_calls: AtomicUsize,
    reject_everything: bool,
}

impl TokenServer {
    fn rejecting_everything() -> Self {
        Self {
            reject_everything: true,
            ..Self::default()
        }
    }

    /// Expires the issued token on the server side.
    fn expire_token(&self) {
        *self.valid_token.lock().unwrap() = None;
    }

    fn logins(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    fn api_calls(&self) -> usize {
        self.api_calls.load(Ordering::SeqCst)
    }

    fn json(code: u16, body: serde_json::Value) -> HttpResponse {
        HttpResponse::new(code, HashMap::new(), body.to_string())
    }
}

#[async_trait]
impl Transport for TokenServer {
    async fn send(&self, request: TransportRequest) -> Result<HttpResponse, TransportError> {
        if request.url.ends_with("/api_auth") {
            // Hold the login open long enough for concurrent callers to pile up.
            tokio::time::sleep(Duration::from_millis(50)).await;
            let n = self.logins.fetch_add(1, Ordering::SeqCst) + 1;
            let token = format!("tok-{n}");
            *self.valid_token.lock().unwrap() = Some(token.clone());
            return Ok(Self::json(
                200,
                json!({"auth_token": token, "status": "success", "data": {"account_id": "A1"}}),
            ));
        }

        self.api_calls.fetch_add(1, Ordering::SeqCst);
        let presented = request.headers.get("X-Auth-Token").cloned();
        let accepted = !self.reject_everything
            && presented.is_some()
            && presented == *self.valid_token.lock().unwrap();

        if accepted {
            Ok(Self::json(200, json!({"status": "success", "data": {"id": "A1"}})))
        } else {
            Ok(Self::json(
                401,
                json!({"status": "error", "error": "401", "message": "invalid credentials"}),
            ))
        }
    }
}

fn client(server: Arc<TokenServer>) -> KazooClient {
    let config = KazooConfig::builder()
        .api_key(ApiKey::new("key-123").unwrap())
        .build()
        .unwrap();
    KazooClient::with_transport(&config, Registry::builtin().unwrap(), server)
}

fn get_account() -> OperationArgs {
    OperationArgs::new().param("account_id", "A1")
}

// ============================================================================
// Retry Policy
// ============================================================================

#[tokio::test]
async fn test_expired_token_is_refreshed_and_request_retried_once() {
    let server = Arc::new(TokenServer::default());
    let client = client(server.clone());

    client.authenticate().await.unwrap();
    server.expire_token();

    let envelope = client.call("get_account", &get_account()).await.unwrap();

    assert_eq!(envelope.data["id"], "A1");
    assert_eq!(server.logins(), 2);
    assert_eq!(server.api_calls(), 2);
    assert_eq!(client.auth_state().token().unwrap().token(), "tok-2");
}

#[tokio::test]
async fn test_second_rejection_propagates_without_further_retries() {
    let server = Arc::new(TokenServer::rejecting_everything());
    let client = client(server.clone());

    let result = client.call("get_account", &get_account()).await;

    assert!(matches!(result, Err(KazooError::Authentication { .. })));
    assert_eq!(server.logins(), 2);
    assert_eq!(server.api_calls(), 2);
}

#[tokio::test]
async fn test_authenticate_is_idempotent() {
    let server = Arc::new(TokenServer::default());
    let client = client(server.clone());

    assert_eq!(client.auth_state(), AuthState::Unauthenticated);
    let first = client.authenticate().await.unwrap();
    let second = client.authenticate().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(server.logins(), 1);
    assert_eq!(client.account_id().as_deref(), Some("A1"));
}

// ============================================================================
// Single-flight
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_rejections_share_one_login() {
    let server = Arc::new(TokenServer::default());
    let client = Arc::new(client(server.clone()));

    client.authenticate().await.unwrap();
    server.expire_token();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.call("get_account", &get_account()).await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
    assert_eq!(server.logins(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_calls_share_one_login() {
    let server = Arc::new(TokenServer::default());
    let client = Arc::new(client(server.clone()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.call("get_account", &get_account()).await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
    assert_eq!(server.logins(), 1);
    assert_eq!(server.api_calls(), 8);
}
