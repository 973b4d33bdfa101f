//! Error types for Kazoo API calls.
//!
//! This module contains the error taxonomy surfaced by every synthesized
//! operation.
//!
//! # Error Handling
//!
//! - [`KazooError::Configuration`]: Malformed descriptors or settings (startup only)
//! - [`KazooError::MissingParameter`]: A path or body argument was not supplied (no I/O)
//! - [`KazooError::InvalidMethod`]: An unsupported HTTP verb
//! - [`KazooError::InvalidRequest`]: A request that cannot be sent as built
//! - [`KazooError::BadRequest`]: Envelope error `400` with validation details
//! - [`KazooError::Authentication`]: Envelope error `401`
//! - [`KazooError::Api`]: Any other error envelope
//! - [`KazooError::Server`]: HTTP status 500 or above
//! - [`KazooError::Transport`]: No response could be obtained
//!
//! # Example
//!
//! ```rust,ignore
//! use kazoo_api::{KazooError, OperationArgs};
//!
//! match client.call("get_device", args).await {
//!     Ok(envelope) => println!("Device: {}", envelope.data),
//!     Err(KazooError::BadRequest { data }) => println!("Invalid payload: {data}"),
//!     Err(KazooError::Server { request_id, .. }) => println!("Server fault, id {request_id:?}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::error::ConfigError;

/// Error returned when the transport could not produce a response at all.
///
/// Connection refusal, DNS failure, TLS errors and timeouts end up here.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    /// Human-readable description of the failure.
    pub message: String,
    /// The underlying error, when one is available.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// Creates a transport error with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self {
            message: format!("Network error: {error}"),
            source: Some(Box::new(error)),
        }
    }
}

/// Unified error type for Kazoo API operations.
#[derive(Debug, Error)]
pub enum KazooError {
    /// A resource descriptor or client setting is malformed.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// A required path or body argument was not supplied.
    #[error("Argument '{name}' is required")]
    MissingParameter {
        /// The name of the missing argument.
        name: String,
    },

    /// The HTTP verb is not one of get, post, put, patch, delete.
    #[error("Method {method} is not a valid http method")]
    InvalidMethod {
        /// The rejected verb.
        method: String,
    },

    /// The server rejected the payload (envelope error `400`).
    #[error("Invalid data: {data}")]
    BadRequest {
        /// The server's description of the validation problem.
        data: serde_json::Value,
    },

    /// The auth token was rejected (envelope error `401`).
    #[error("Authentication failed: {message}")]
    Authentication {
        /// The server's message, or a fixed description.
        message: String,
    },

    /// Any other error envelope.
    #[error("There was an error calling the kazoo api, request id was {request_id:?}, the error was {message}")]
    Api {
        /// The envelope's `error` code, if present.
        code: Option<String>,
        /// The envelope's `message`.
        message: String,
        /// The envelope's `request_id`.
        request_id: Option<String>,
    },

    /// The server answered with a 5xx status.
    #[error("Internal server error ({status}), request id was {request_id:?}, message was {message}")]
    Server {
        /// The HTTP status code.
        status: u16,
        /// The `X-Request-Id` response header.
        request_id: Option<String>,
        /// Best-effort message extracted from the body.
        message: String,
    },

    /// The transport failed before a response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The body was not a JSON envelope and strict decoding is enabled.
    #[error("Could not decode response body: {message}")]
    Decode {
        /// The decoder's description of the problem.
        message: String,
    },

    /// The login exchange succeeded but the response lacked a required field.
    #[error("Login response is missing '{field}'")]
    MalformedLogin {
        /// The missing field.
        field: &'static str,
    },

    /// No operation with this name is registered.
    #[error("Unknown operation '{name}'")]
    UnknownOperation {
        /// The requested operation name.
        name: String,
    },

    /// The request cannot be sent as built.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// What is wrong with the request.
        message: String,
    },
}

impl KazooError {
    /// Returns `true` if this error should trigger re-authentication.
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Api { request_id, .. } | Self::Server { request_id, .. } => {
                request_id.as_deref()
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for KazooError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(TransportError::from(error))
    }
}

// Verify KazooError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KazooError>();
};
