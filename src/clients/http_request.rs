//! HTTP request types for the Kazoo API client.
//!
//! This module provides the [`HttpRequest`] type and its builder. A request
//! is an immutable description of one API call: verb, resolved path, query
//! parameters, optional payload or [`FileUpload`], and whether an auth token
//! must be attached.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::clients::errors::KazooError;
use crate::rest::path;

/// HTTP methods supported by the Kazoo API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for replacing resources.
    Post,
    /// HTTP PUT method for creating resources.
    Put,
    /// HTTP PATCH method for merging partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case wire name of the method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` for verbs whose operations carry a `data` payload.
    #[must_use]
    pub const fn carries_body(&self) -> bool {
        matches!(self, Self::Put | Self::Post | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

impl FromStr for HttpMethod {
    type Err = KazooError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "patch" => Ok(Self::Patch),
            "delete" => Ok(Self::Delete),
            _ => Err(KazooError::InvalidMethod {
                method: s.to_string(),
            }),
        }
    }
}

/// Default content type for uploaded files.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A file sent as a `multipart/form-data` part instead of a JSON body.
///
/// # Example
///
/// ```rust
/// use kazoo_api::clients::FileUpload;
///
/// let upload = FileUpload::new("greeting.mp3", vec![0xFF, 0xFB]).content_type("audio/mpeg");
/// assert_eq!(upload.filename(), "greeting.mp3");
/// assert_eq!(upload.len(), 2);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FileUpload {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl FileUpload {
    /// Creates an upload of `bytes` named `filename`, typed as
    /// [`OCTET_STREAM`].
    #[must_use]
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content_type: OCTET_STREAM.to_string(),
            bytes: bytes.into(),
        }
    }

    /// Sets the part's content type.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Returns the file name, also used as the form field name.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the part's content type.
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.content_type
    }

    /// Returns the file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the size of the file in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the file is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// An HTTP request to be sent to the Kazoo API.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use kazoo_api::clients::{HttpRequest, HttpMethod};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Post, "/accounts/A1/devices/D1")
///     .body(json!({"name": "Desk phone"}))
///     .build()
///     .unwrap();
///
/// assert!(request.auth_required);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute path (relative to the base URL) with all parameters substituted.
    pub path: String,
    /// Query parameters to append to the URL.
    pub query: Option<BTreeMap<String, String>>,
    /// The payload, sent wrapped as `{"data": ...}`.
    pub body: Option<serde_json::Value>,
    /// A file sent as multipart form data. Takes the place of `body`.
    pub file: Option<FileUpload>,
    /// Whether the `X-Auth-Token` header must be attached.
    pub auth_required: bool,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`KazooError::MissingParameter`] if the path still contains a
    /// `{placeholder}`.
    pub fn verify(&self) -> Result<(), KazooError> {
        if let Some(name) = path::unresolved(&self.path) {
            return Err(KazooError::MissingParameter {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Returns the path with its query string appended.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        match self.query.as_ref().filter(|q| !q.is_empty()) {
            Some(query) => {
                let encoded: Vec<String> = query
                    .iter()
                    .map(|(k, v)| {
                        format!("{}={}", urlencoding::encode(k), urlencoding::encode(v))
                    })
                    .collect();
                format!("{}?{}", self.path, encoded.join("&"))
            }
            None => self.path.clone(),
        }
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    query: Option<BTreeMap<String, String>>,
    body: Option<serde_json::Value>,
    file: Option<FileUpload>,
    auth_required: bool,
}

impl HttpRequestBuilder {
    /// Creates a new builder with the required method and path.
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            query: None,
            body: None,
            file: None,
            auth_required: true,
        }
    }

    /// Sets the request payload.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Attaches a file to send as multipart form data.
    #[must_use]
    pub fn file(mut self, file: FileUpload) -> Self {
        self.file = Some(file);
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: BTreeMap<String, String>) -> Self {
        self.query = Some(query);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets whether the request needs an auth token. Defaults to `true`.
    #[must_use]
    pub const fn auth_required(mut self, required: bool) -> Self {
        self.auth_required = required;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// - [`KazooError::MissingParameter`] if the path is not fully resolved
    /// - [`KazooError::InvalidRequest`] if both a payload and a file are set,
    ///   or a file is attached to a verb without a body
    pub fn build(self) -> Result<HttpRequest, KazooError> {
        if self.file.is_some() && (self.body.is_some() || !self.http_method.carries_body()) {
            return Err(KazooError::InvalidRequest {
                message: format!(
                    "A file upload needs a put, post or patch request without a data payload, got {}",
                    self.http_method
                ),
            });
        }

        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            query: self.query,
            body: self.body,
            file: self.file,
            auth_required: self.auth_required,
        };
        request.verify()?;
        Ok(request)
    }
}
