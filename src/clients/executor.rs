//! Request execution and envelope classification.
//!
//! The [`Executor`] turns an [`HttpRequest`] into a decoded [`Envelope`]:
//!
//! 1. Pre-flight validation (no unresolved path parameters)
//! 2. Header construction (`Content-Type`, optional `X-Auth-Token`)
//! 3. Body wrapping as `{"data": ...}`
//! 4. Transport round-trip
//! 5. 5xx responses become [`KazooError::Server`]
//! 6. Envelope decoding, honouring the configured [`DecodeMode`] for 2xx
//!    responses; any other status without an error envelope is an error
//! 7. Error envelopes are classified into typed errors
//!
//! The executor itself never retries. The single re-authentication retry
//! lives in [`KazooClient`](crate::KazooClient).

use std::collections::HashMap;
use std::sync::Arc;

use crate::clients::errors::KazooError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::{Envelope, HttpResponse};
use crate::clients::transport::{Transport, TransportRequest};
use crate::config::{BaseUrl, DecodeMode, KazooConfig};

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the auth token.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

const NO_ERROR_MESSAGE: &str = "There was no error message";

/// Sends requests over a [`Transport`] and classifies the responses.
///
/// # Thread Safety
///
/// `Executor` is `Send + Sync` and holds no per-request state.
#[derive(Debug, Clone)]
pub struct Executor {
    transport: Arc<dyn Transport>,
    base_url: BaseUrl,
    decode_mode: DecodeMode,
    default_headers: HashMap<String, String>,
}

// Verify Executor is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Executor>();
};

impl Executor {
    /// Creates an executor for the configured base URL and decode policy.
    #[must_use]
    pub fn new(config: &KazooConfig, transport: Arc<dyn Transport>) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Kazoo API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        default_headers.insert("User-Agent".to_string(), user_agent);

        Self {
            transport,
            base_url: config.base_url().clone(),
            decode_mode: config.decode_mode(),
            default_headers,
        }
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends `request`, attaching `token` when the request requires auth.
    ///
    /// # Errors
    ///
    /// - [`KazooError::MissingParameter`] if the path is not fully resolved
    ///   (raised before any I/O)
    /// - [`KazooError::Transport`] if no response was obtained
    /// - [`KazooError::Server`] for 5xx responses
    /// - [`KazooError::Decode`] for undecodable bodies in strict mode
    /// - [`KazooError::BadRequest`], [`KazooError::Authentication`] or
    ///   [`KazooError::Api`] for error envelopes
    pub async fn execute(
        &self,
        request: &HttpRequest,
        token: Option<&str>,
    ) -> Result<Envelope, KazooError> {
        request.verify()?;

        let url = self.base_url.join(&request.path_and_query());

        let mut headers = self.default_headers.clone();
        if request.auth_required {
            match token {
                Some(token) => {
                    headers.insert(AUTH_TOKEN_HEADER.to_string(), token.to_string());
                }
                None => tracing::debug!(
                    "Sending {} {} without an auth token; call authenticate() first",
                    request.http_method,
                    request.path
                ),
            }
        }

        let body = request
            .body
            .as_ref()
            .map(|data| serde_json::json!({ "data": data }).to_string());
        if request.file.is_some() {
            // The transport sets the multipart content type and boundary.
            headers.remove("Content-Type");
        }

        tracing::debug!("Making {} request to url {}", request.http_method, url);

        let response = self
            .transport
            .send(TransportRequest {
                method: request.http_method,
                url,
                headers,
                body,
                file: request.file.clone(),
            })
            .await?;

        if response.is_server_error() {
            return Err(Self::server_error(&response));
        }

        let envelope = self.decode(&response, request)?;
        if envelope.is_success() {
            return Ok(envelope);
        }

        tracing::debug!(
            "There was an error, full error text is: {}",
            String::from_utf8_lossy(&response.body)
        );
        Err(classify(envelope))
    }

    fn decode(&self, response: &HttpResponse, request: &HttpRequest) -> Result<Envelope, KazooError> {
        if !response.is_success() {
            return match serde_json::from_slice::<Envelope>(&response.body) {
                Ok(envelope) if !envelope.is_success() => Ok(envelope),
                _ => Err(Self::status_error(response)),
            };
        }

        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Envelope::empty());
        }

        match serde_json::from_slice::<Envelope>(&response.body) {
            Ok(envelope) => Ok(envelope),
            Err(e) => match self.decode_mode {
                DecodeMode::Permissive => {
                    tracing::warn!(
                        "Undecodable response to {} {} treated as empty success: {}",
                        request.http_method,
                        request.path,
                        e
                    );
                    Ok(Envelope::empty())
                }
                DecodeMode::Strict => Err(KazooError::Decode {
                    message: e.to_string(),
                }),
            },
        }
    }

    /// Error for a non-2xx response that carries no error envelope.
    fn status_error(response: &HttpResponse) -> KazooError {
        let text = String::from_utf8_lossy(&response.body);
        let message = if text.trim().is_empty() {
            NO_ERROR_MESSAGE.to_string()
        } else {
            text.trim().to_string()
        };
        tracing::debug!("HTTP {} without an error envelope: {}", response.code, message);

        if response.code == 401 {
            KazooError::Authentication { message }
        } else {
            KazooError::Api {
                code: Some(response.code.to_string()),
                message,
                request_id: response.request_id().map(String::from),
            }
        }
    }

    fn server_error(response: &HttpResponse) -> KazooError {
        let message = serde_json::from_slice::<serde_json::Value>(&response.body)
            .ok()
            .and_then(|body| {
                match body.get("data") {
                    Some(serde_json::Value::String(s)) => Some(s.clone()),
                    Some(serde_json::Value::Null) | None => None,
                    Some(other) => Some(other.to_string()),
                }
                .or_else(|| {
                    body.get("message")
                        .and_then(serde_json::Value::as_str)
                        .map(String::from)
                })
            })
            .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string());

        KazooError::Server {
            status: response.code,
            request_id: response.request_id().map(String::from),
            message,
        }
    }
}

/// Maps an error envelope to its typed error.
///
/// - `error == "400"` with a `data` member → [`KazooError::BadRequest`]
/// - `error == "401"` → [`KazooError::Authentication`]
/// - anything else → [`KazooError::Api`]
#[must_use]
pub fn classify(envelope: Envelope) -> KazooError {
    match envelope.error.as_deref() {
        Some("400") if envelope.has_data() => KazooError::BadRequest {
            data: envelope.data,
        },
        Some("401") => KazooError::Authentication {
            message: envelope
                .message
                .unwrap_or_else(|| "Invalid credentials".to_string()),
        },
        _ => KazooError::Api {
            code: envelope.error,
            message: envelope
                .message
                .unwrap_or_else(|| NO_ERROR_MESSAGE.to_string()),
            request_id: envelope.request_id,
        },
    }
}
