//! The pluggable HTTP transport.
//!
//! The executor never talks to the network directly. It hands a fully built
//! [`TransportRequest`] to a [`Transport`] and gets back a raw
//! [`HttpResponse`]. TLS, connection pooling, redirects and timeouts are
//! properties of the transport.
//!
//! [`ReqwestTransport`] is the default implementation.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::http_request::{FileUpload, HttpMethod};
use crate::clients::http_response::HttpResponse;

/// A request ready to be put on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The absolute URL including any query string.
    pub url: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// The serialized body, if any.
    pub body: Option<String>,
    /// A file to send as `multipart/form-data` in place of `body`.
    pub file: Option<FileUpload>,
}

/// Sends an HTTP request and returns the raw response.
///
/// Implementations must return `Ok` for every response the server produced,
/// whatever its status code; `Err` is reserved for failures to obtain a
/// response.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Sends `request` and waits for the response.
    async fn send(&self, request: TransportRequest) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] backed by a `reqwest` client using rustls.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with a default rustls-backed client.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest` client, e.g. one with custom timeouts.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Wraps `file` as the single part of a multipart form, keyed by its file name.
    fn multipart_form(file: FileUpload) -> Result<reqwest::multipart::Form, TransportError> {
        let field = file.filename().to_string();
        let part = reqwest::multipart::Part::bytes(file.bytes().to_vec())
            .file_name(field.clone())
            .mime_str(file.mime())?;
        Ok(reqwest::multipart::Form::new().part(field, part))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<HttpResponse, TransportError> {
        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Patch => self.client.patch(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(file) = request.file {
            req_builder = req_builder.multipart(Self::multipart_form(file)?);
        } else if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.bytes().await?.to_vec();

        Ok(HttpResponse::new(code, headers, body))
    }
}
