//! HTTP response types for the Kazoo API client.
//!
//! This module provides the raw [`HttpResponse`] returned by a transport and
//! the decoded [`Envelope`] every Kazoo endpoint wraps its payload in.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// A raw response as produced by a [`Transport`](crate::clients::Transport).
///
/// Header names are stored lower-cased; a header may carry several values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub code: u16,
    /// Response headers keyed by lower-cased name.
    pub headers: HashMap<String, Vec<String>>,
    /// The undecoded body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new response.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            code,
            headers,
            body: body.into(),
        }
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Request-Id` header value.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns `true` for a 2xx status code.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code >= 200 && self.code < 300
    }

    /// Returns `true` if the status code is in the server fault class.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.code >= 500
    }
}

/// Envelope `status` values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    /// The call succeeded.
    #[default]
    Success,
    /// The call failed; see `error` and `message`.
    Error,
    /// The server reported a fatal condition.
    Fatal,
}

/// The JSON wrapper around every Kazoo response.
///
/// ```json
/// {"status": "success", "data": {...}, "request_id": "...", "revision": "..."}
/// ```
///
/// # Example
///
/// ```rust
/// use kazoo_api::clients::{Envelope, EnvelopeStatus};
///
/// let envelope: Envelope = serde_json::from_str(
///     r#"{"status":"error","error":"401","message":"invalid credentials","data":{}}"#,
/// ).unwrap();
/// assert_eq!(envelope.status, EnvelopeStatus::Error);
/// assert_eq!(envelope.error.as_deref(), Some("401"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Whether the call succeeded.
    #[serde(default)]
    pub status: EnvelopeStatus,
    /// The payload.
    #[serde(default)]
    pub data: serde_json::Value,
    /// Server-side request identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Document revision, on object responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Error code such as `"400"` or `"401"`. Numeric codes are normalized to strings.
    #[serde(
        default,
        deserialize_with = "deserialize_error_code",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<String>,
    /// Human-readable error message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Auth token, present on login responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

impl Envelope {
    /// The value returned for an empty or (in permissive mode) undecodable body.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if `status` is `success`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == EnvelopeStatus::Success
    }

    /// Returns `true` if the envelope carries a non-null `data` member.
    #[must_use]
    pub fn has_data(&self) -> bool {
        !self.data.is_null()
    }
}

fn deserialize_error_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
