//! # Kazoo API Rust Client
//!
//! A Rust client for the Kazoo (2600Hz) REST API. Resources are declared as
//! data and turned into named, callable operations at startup, so the whole
//! API surface is driven by a resource table rather than hand-written
//! methods.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`KazooConfig`] and [`KazooConfigBuilder`]
//! - Validated newtypes for credentials and the API base URL
//! - Declarative resources ([`rest::ResourceDescriptor`], [`rest::ResourceSpec`])
//! - Operation synthesis and an explicit dispatch table ([`rest::Registry`])
//! - API key and username/password login with single-flight re-authentication
//! - A pluggable async transport, with a `reqwest` default and a scripted mock
//!
//! ## Quick Start
//!
//! ```rust
//! use kazoo_api::{ApiKey, BaseUrl, KazooConfig};
//!
//! let config = KazooConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .base_url(BaseUrl::new("https://kazoo.example.com:8443/v2").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert!(config.base_url().is_https());
//! ```
//!
//! ## Calling Operations
//!
//! ```rust,ignore
//! use kazoo_api::{KazooClient, KazooConfig, Password};
//! use kazoo_api::rest::OperationArgs;
//! use serde_json::json;
//!
//! let config = KazooConfig::builder()
//!     .username("admin")
//!     .password(Password::new("secret")?)
//!     .account_name("acme")
//!     .build()?;
//! let client = KazooClient::new(&config)?;
//!
//! client.authenticate().await?;
//! let account_id = client.account_id().unwrap();
//!
//! // PUT /accounts/{account_id}/devices
//! client
//!     .call(
//!         "create_device",
//!         &OperationArgs::new()
//!             .param("account_id", &account_id)
//!             .data(json!({"name": "Front desk"})),
//!     )
//!     .await?;
//!
//! // POST /accounts/{account_id}/devices/{device_id}/sync
//! client
//!     .call(
//!         "reboot_device",
//!         &OperationArgs::new()
//!             .param("account_id", &account_id)
//!             .param("device_id", "D1")
//!             .data(json!({})),
//!     )
//!     .await?;
//! ```
//!
//! ## Custom Resource Tables
//!
//! ```rust
//! use kazoo_api::rest::Registry;
//!
//! let registry = Registry::from_json(r#"[
//!     {
//!         "name": "device",
//!         "path": "/accounts/{account_id}/devices/{device_id}",
//!         "methods": ["list", "detail"],
//!         "extra_views": [
//!             {"name": "reboot_device", "path": "sync", "scope": "object", "method": "post"}
//!         ]
//!     }
//! ]"#).unwrap();
//!
//! let names: Vec<&str> = registry.operations().map(|op| op.name()).collect();
//! assert_eq!(names, vec!["get_device", "get_devices", "reboot_device"]);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration and registries are instance-based
//! - **Fail-fast validation**: Descriptors and newtypes validate on construction
//! - **No I/O on bad arguments**: Missing parameters are reported before sending
//! - **Thread-safe**: The client is `Send + Sync`
//! - **Async-first**: Designed for use with the Tokio runtime

pub mod auth;
mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

pub use client::KazooClient;

// Re-export public types at crate root for convenience
pub use auth::{AuthState, AuthToken};
pub use config::{
    ApiKey, BaseUrl, Credentials, DecodeMode, KazooConfig, KazooConfigBuilder, Password,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    Envelope, EnvelopeStatus, FileUpload, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse, KazooError, Transport, TransportError,
};
