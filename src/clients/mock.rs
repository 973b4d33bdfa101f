//! # Mock Transport
//!
//! A scripted [`Transport`] for testing code that drives the client without a
//! network.
//!
//! Queue responses with [`MockTransport::push_json`] (or the lower-level
//! variants), run the code under test, then inspect
//! [`MockTransport::requests`] to assert on what was sent.
//!
//! # Example
//!
//! ```rust
//! use kazoo_api::clients::MockTransport;
//! use serde_json::json;
//!
//! let transport = MockTransport::new();
//! transport.push_json(200, json!({"status": "success", "data": []}));
//! assert_eq!(transport.call_count(), 0);
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::{Transport, TransportRequest};

/// A [`Transport`] that replays queued responses in FIFO order and records
/// every request it receives.
///
/// When the queue is exhausted, `send` fails with a [`TransportError`].
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    /// Creates a mock with an empty response queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw response.
    pub fn push_response(&self, response: HttpResponse) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(response));
    }

    /// Queues a response with the given status and JSON body.
    pub fn push_json(&self, code: u16, body: serde_json::Value) {
        self.push_response(HttpResponse::new(code, HashMap::new(), body.to_string()));
    }

    /// Queues a transport failure.
    pub fn push_error(&self, error: TransportError) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(error));
    }

    /// Returns a copy of every request sent so far.
    #[must_use]
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns how many requests were sent.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns how many queued responses have not been consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<HttpResponse, TransportError> {
        let description = format!("{} {}", request.method.as_str(), request.url);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                Err(TransportError::new(format!(
                    "MockTransport has no response queued for {description}"
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpMethod;
    use serde_json::json;

    fn request(url: &str) -> TransportRequest {
        TransportRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            headers: HashMap::new(),
            body: None,
            file: None,
        }
    }

    #[tokio::test]
    async fn test_replays_in_order_and_records() {
        let transport = MockTransport::new();
        transport.push_json(200, json!({"n": 1}));
        transport.push_json(201, json!({"n": 2}));

        let first = transport.send(request("http://x/1")).await.unwrap();
        let second = transport.send(request("http://x/2")).await.unwrap();

        assert_eq!(first.code, 200);
        assert_eq!(second.code, 201);
        assert_eq!(transport.call_count(), 2);
        assert_eq!(transport.requests()[1].url, "http://x/2");
        assert_eq!(transport.remaining(), 0);
    }

    #[tokio::test]
    async fn test_exhausted_queue_is_transport_error() {
        let transport = MockTransport::new();
        let result = transport.send(request("http://x/about")).await;

        let error = result.unwrap_err();
        assert!(error.message.contains("GET http://x/about"));
    }
}
