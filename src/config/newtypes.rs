//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated Kazoo API key.
///
/// The key is sent verbatim in the `/api_auth` login exchange. Its `Debug`
/// output is masked so it cannot leak through logs.
///
/// # Example
///
/// ```rust
/// use kazoo_api::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated account password.
///
/// # Security
///
/// The `Debug` implementation masks the value, displaying only
/// `Password(*****)`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Creates a new validated password.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCredential`] if the password is empty.
    pub fn new(password: impl Into<String>) -> Result<Self, ConfigError> {
        let password = password.into();
        if password.is_empty() {
            return Err(ConfigError::EmptyCredential { field: "password" });
        }
        Ok(Self(password))
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(*****)")
    }
}

/// A validated API base URL such as `http://api.2600hz.com:8000/v1`.
///
/// The scheme must be `http` or `https` and a host must follow it. Trailing
/// slashes are removed so request paths (which always start with `/`) can be
/// appended directly.
///
/// # Serialization
///
/// `BaseUrl` serializes to and deserializes from its string form:
///
/// ```rust
/// use kazoo_api::BaseUrl;
///
/// let url = BaseUrl::new("https://kazoo.example.com:8443/v2/").unwrap();
/// let json = serde_json::to_string(&url).unwrap();
/// assert_eq!(json, r#""https://kazoo.example.com:8443/v2""#);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// The public 2600Hz sandbox used when no base URL is configured.
    pub const DEFAULT: &'static str = "http://api.2600hz.com:8000/v1";

    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the scheme is missing or
    /// unsupported, or if no host follows the scheme.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let trimmed = url.trim().trim_end_matches('/');

        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"));

        match rest {
            Some(rest) if !rest.is_empty() && !rest.starts_with('/') => {
                Ok(Self(trimmed.to_string()))
            }
            _ => Err(ConfigError::InvalidBaseUrl { url }),
        }
    }

    /// Returns `true` if the URL uses TLS.
    #[must_use]
    pub fn is_https(&self) -> bool {
        self.0.starts_with("https://")
    }

    /// Joins an absolute request path onto this base URL.
    #[must_use]
    pub fn join(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.0)
        } else {
            format!("{}/{path}", self.0)
        }
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for BaseUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_rejects_empty() {
        assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_api_key_debug_is_masked() {
        let key = ApiKey::new("super-secret").unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_password_rejects_empty() {
        assert!(matches!(
            Password::new(""),
            Err(ConfigError::EmptyCredential { field: "password" })
        ));
    }

    #[test]
    fn test_password_debug_is_masked() {
        let password = Password::new("hunter2").unwrap();
        assert_eq!(format!("{password:?}"), "Password(*****)");
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let url = BaseUrl::new("http://localhost:8000/v2/").unwrap();
        assert_eq!(url.as_ref(), "http://localhost:8000/v2");
    }

    #[test]
    fn test_base_url_rejects_missing_scheme() {
        let result = BaseUrl::new("api.2600hz.com:8000/v1");
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_base_url_rejects_missing_host() {
        assert!(BaseUrl::new("https://").is_err());
        assert!(BaseUrl::new("http:///v1").is_err());
    }

    #[test]
    fn test_base_url_join() {
        let url = BaseUrl::new("http://localhost:8000/v2").unwrap();
        assert_eq!(
            url.join("/accounts/A1"),
            "http://localhost:8000/v2/accounts/A1"
        );
        assert_eq!(url.join("about"), "http://localhost:8000/v2/about");
    }

    #[test]
    fn test_base_url_is_https() {
        assert!(BaseUrl::new("https://kazoo.example.com").unwrap().is_https());
        assert!(!BaseUrl::default().is_https());
    }

    #[test]
    fn test_base_url_deserialize_validates() {
        let ok: Result<BaseUrl, _> = serde_json::from_str(r#""http://localhost:8000/v2""#);
        assert!(ok.is_ok());

        let bad: Result<BaseUrl, _> = serde_json::from_str(r#""ftp://localhost""#);
        assert!(bad.is_err());
    }
}
