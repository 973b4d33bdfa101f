//! Configuration error types for the Kazoo API client.
//!
//! This module contains the error type raised when client settings or resource
//! descriptors are malformed. These errors are detected while the client and
//! its operation registry are being built, never while a request is in flight.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use kazoo_api::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the client or registering resources.
///
/// Every variant is fatal: a `ConfigError` means the program was assembled
/// incorrectly and retrying the same call cannot succeed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Kazoo API key.")]
    EmptyApiKey,

    /// A password-flow credential field was empty.
    #[error("Credential field '{field}' cannot be empty when using username/password authentication.")]
    EmptyCredential {
        /// The name of the empty field.
        field: &'static str,
    },

    /// Neither an API key nor a username/password pair was supplied.
    #[error("Missing credentials. Provide either an API key or a username, password and account name.")]
    MissingCredentials,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The API base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with an http or https scheme (e.g., 'http://api.example.com:8000/v2').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A resource path template contains no `{param}` placeholder.
    #[error("Resource path '{path}' must contain at least one {{parameter}} placeholder.")]
    NoPathParameters {
        /// The offending path template.
        path: String,
    },

    /// A method kind outside list/detail/create/update/partial_update/delete.
    #[error("Unknown method kind '{kind}' on resource '{resource}'.")]
    UnknownMethodKind {
        /// The resource being registered.
        resource: String,
        /// The unrecognized method kind.
        kind: String,
    },

    /// An extra view declared a scope other than object/aggregate/system.
    #[error("Extra view '{view}' declares unknown scope '{scope}'. Expected 'object', 'aggregate' or 'system'.")]
    UnknownScope {
        /// The extra view name.
        view: String,
        /// The unrecognized scope.
        scope: String,
    },

    /// An extra view declared an unsupported HTTP verb.
    #[error("Extra view '{view}' declares unsupported HTTP verb '{verb}'.")]
    UnknownVerb {
        /// The extra view name.
        view: String,
        /// The unrecognized verb.
        verb: String,
    },

    /// Two operations in the same registry resolved to the same name.
    #[error("Operation '{name}' is defined by both '{first}' and '{second}'.")]
    DuplicateOperation {
        /// The clashing operation name.
        name: String,
        /// The resource that registered the name first.
        first: String,
        /// The resource that tried to register it again.
        second: String,
    },

    /// A declarative resource table could not be parsed.
    #[error("Invalid resource table: {reason}")]
    InvalidResourceTable {
        /// The parser's description of the problem.
        reason: String,
    },
}
