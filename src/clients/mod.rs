//! HTTP plumbing for the Kazoo API client.
//!
//! This module provides the request/response types, the pluggable transport,
//! and the executor that decodes and classifies Kazoo's JSON envelope.
//!
//! # Overview
//!
//! - [`HttpRequest`]: An immutable description of one API call
//! - [`HttpResponse`]: The raw status/headers/body returned by a transport
//! - [`Envelope`]: The decoded `{status, data, request_id, ...}` wrapper
//! - [`Transport`]: The "send a request, get a response" capability
//! - [`ReqwestTransport`]: The default `reqwest` transport
//! - [`MockTransport`]: A scripted transport for tests
//! - [`Executor`]: Sends requests and classifies envelopes into [`KazooError`]s
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use kazoo_api::clients::{Executor, HttpMethod, HttpRequest, ReqwestTransport};
//!
//! let executor = Executor::new(&config, Arc::new(ReqwestTransport::new()?));
//! let request = HttpRequest::builder(HttpMethod::Get, "/about").build()?;
//! let envelope = executor.execute(&request, Some(&token)).await?;
//! ```

mod errors;
mod executor;
mod http_request;
mod http_response;
mod mock;
mod transport;

pub use errors::{KazooError, TransportError};
pub use executor::{classify, Executor, AUTH_TOKEN_HEADER, SDK_VERSION};
pub use http_request::{FileUpload, HttpMethod, HttpRequest, HttpRequestBuilder, OCTET_STREAM};
pub use http_response::{Envelope, EnvelopeStatus, HttpResponse};
pub use mock::MockTransport;
pub use transport::{ReqwestTransport, Transport, TransportRequest};
