//! Configuration types for the Kazoo API client.
//!
//! This module provides the configuration used to construct a
//! [`KazooClient`](crate::KazooClient).
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`KazooConfig`]: The main configuration struct holding all client settings
//! - [`KazooConfigBuilder`]: A builder for constructing [`KazooConfig`] instances
//! - [`Credentials`]: The login method (API key or username/password)
//! - [`DecodeMode`]: How undecodable response bodies are treated
//! - [`ApiKey`], [`Password`], [`BaseUrl`]: Validated newtypes
//!
//! # Example
//!
//! ```rust
//! use kazoo_api::{KazooConfig, ApiKey, BaseUrl};
//!
//! let config = KazooConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .base_url(BaseUrl::new("http://kazoo.local:8000/v2").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{ApiKey, BaseUrl, Password};

use crate::error::ConfigError;

/// The login method used to obtain an auth token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    /// Exchange a raw API key at `/api_auth`.
    ApiKey(ApiKey),
    /// Exchange a hashed `username:password` pair at `/user_auth`.
    UserPassword {
        /// The login name.
        username: String,
        /// The account password.
        password: Password,
        /// The account the user belongs to.
        account_name: String,
    },
}

/// How the executor treats a response body that is not valid JSON.
///
/// The Kazoo API occasionally answers with an empty or non-JSON body.
/// `Permissive` treats such bodies as an empty successful envelope. This is
/// intentionally lossy: a truncated or HTML error page is indistinguishable
/// from "no data". `Strict` surfaces them as
/// [`KazooError::Decode`](crate::KazooError::Decode).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Undecodable bodies become an empty successful envelope.
    #[default]
    Permissive,
    /// Undecodable bodies are an error.
    Strict,
}

/// Configuration for the Kazoo API client.
///
/// # Thread Safety
///
/// `KazooConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use kazoo_api::{KazooConfig, Password, DecodeMode};
///
/// let config = KazooConfig::builder()
///     .username("admin")
///     .password(Password::new("secret").unwrap())
///     .account_name("my_account")
///     .decode_mode(DecodeMode::Strict)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.decode_mode(), DecodeMode::Strict);
/// ```
#[derive(Clone, Debug)]
pub struct KazooConfig {
    base_url: BaseUrl,
    credentials: Credentials,
    decode_mode: DecodeMode,
    user_agent_prefix: Option<String>,
}

impl KazooConfig {
    /// Creates a new builder for constructing a `KazooConfig`.
    #[must_use]
    pub fn builder() -> KazooConfigBuilder {
        KazooConfigBuilder::new()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the login credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the response decode policy.
    #[must_use]
    pub const fn decode_mode(&self) -> DecodeMode {
        self.decode_mode
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify KazooConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<KazooConfig>();
};

/// Builder for constructing [`KazooConfig`] instances.
///
/// Either an API key or the full username/password/account name triple must
/// be supplied. When both are present the username/password flow wins.
///
/// # Defaults
///
/// - `base_url`: [`BaseUrl::DEFAULT`]
/// - `decode_mode`: [`DecodeMode::Permissive`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct KazooConfigBuilder {
    base_url: Option<BaseUrl>,
    api_key: Option<ApiKey>,
    username: Option<String>,
    password: Option<Password>,
    account_name: Option<String>,
    decode_mode: Option<DecodeMode>,
    user_agent_prefix: Option<String>,
}

impl KazooConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key used for the key-based login exchange.
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the login name for the password flow.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password for the password flow.
    #[must_use]
    pub fn password(mut self, password: Password) -> Self {
        self.password = Some(password);
        self
    }

    /// Sets the account name for the password flow.
    #[must_use]
    pub fn account_name(mut self, account_name: impl Into<String>) -> Self {
        self.account_name = Some(account_name.into());
        self
    }

    /// Sets the response decode policy.
    #[must_use]
    pub const fn decode_mode(mut self, mode: DecodeMode) -> Self {
        self.decode_mode = Some(mode);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`KazooConfig`], validating the credential combination.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingRequiredField`] if only part of the
    ///   username/password/account name triple is set.
    /// - [`ConfigError::EmptyCredential`] if the username or account name is empty.
    /// - [`ConfigError::MissingCredentials`] if no credentials were supplied.
    pub fn build(self) -> Result<KazooConfig, ConfigError> {
        let credentials = Self::resolve_credentials(
            self.api_key,
            self.username,
            self.password,
            self.account_name,
        )?;

        Ok(KazooConfig {
            base_url: self.base_url.unwrap_or_default(),
            credentials,
            decode_mode: self.decode_mode.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
        })
    }

    fn resolve_credentials(
        api_key: Option<ApiKey>,
        username: Option<String>,
        password: Option<Password>,
        account_name: Option<String>,
    ) -> Result<Credentials, ConfigError> {
        if username.is_none() && password.is_none() && account_name.is_none() {
            return api_key
                .map(Credentials::ApiKey)
                .ok_or(ConfigError::MissingCredentials);
        }

        let username = username.ok_or(ConfigError::MissingRequiredField { field: "username" })?;
        let password = password.ok_or(ConfigError::MissingRequiredField { field: "password" })?;
        let account_name = account_name.ok_or(ConfigError::MissingRequiredField {
            field: "account_name",
        })?;

        if username.is_empty() {
            return Err(ConfigError::EmptyCredential { field: "username" });
        }
        if account_name.is_empty() {
            return Err(ConfigError::EmptyCredential {
                field: "account_name",
            });
        }

        Ok(Credentials::UserPassword {
            username,
            password,
            account_name,
        })
    }
}
