//! The login exchange.
//!
//! Kazoo issues auth tokens from two unauthenticated endpoints:
//!
//! - `PUT /user_auth` with `{"data": {"credentials": md5_hex("user:pass"), "account_name": ...}}`
//! - `PUT /api_auth` with `{"data": {"api_key": ...}}`
//!
//! A successful response carries the token at the envelope's top level
//! (`auth_token`) and the owning account in `data.account_id`.

use md5::{Digest, Md5};
use serde_json::json;

use crate::auth::state::AuthToken;
use crate::clients::{Envelope, HttpMethod, HttpRequest, KazooError};
use crate::config::Credentials;

/// Path of the username/password login endpoint.
pub const USER_AUTH_PATH: &str = "/user_auth";

/// Path of the API key login endpoint.
pub const API_AUTH_PATH: &str = "/api_auth";

/// Computes the credential hash Kazoo expects for a username/password login.
///
/// # Example
///
/// ```rust
/// use kazoo_api::auth::credentials_hash;
///
/// assert_eq!(credentials_hash("admin", "secret"), "2d1e4f91dae49cd08eaba2293e422273");
/// ```
#[must_use]
pub fn credentials_hash(username: &str, password: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(format!("{username}:{password}").as_bytes());
    hex::encode(hasher.finalize())
}

/// Builds the login request for `credentials`.
///
/// The request is sent without an auth token.
///
/// # Errors
///
/// Propagates request validation errors; the login paths carry no
/// placeholders, so none are expected.
pub fn login_request(credentials: &Credentials) -> Result<HttpRequest, KazooError> {
    let (path, data) = match credentials {
        Credentials::ApiKey(key) => {
            let key: &str = key.as_ref();
            (API_AUTH_PATH, json!({ "api_key": key }))
        }
        Credentials::UserPassword {
            username,
            password,
            account_name,
        } => (
            USER_AUTH_PATH,
            json!({
                "credentials": credentials_hash(username, password.as_ref()),
                "account_name": account_name,
            }),
        ),
    };

    HttpRequest::builder(HttpMethod::Put, path)
        .body(data)
        .auth_required(false)
        .build()
}

/// Extracts the token and account from a successful login envelope.
///
/// # Errors
///
/// Returns [`KazooError::MalformedLogin`] if `auth_token` or
/// `data.account_id` is absent or not a string.
pub fn token_from_envelope(envelope: &Envelope, generation: u64) -> Result<AuthToken, KazooError> {
    let token = envelope
        .auth_token
        .as_deref()
        .filter(|token| !token.is_empty())
        .ok_or(KazooError::MalformedLogin {
            field: "auth_token",
        })?;
    let account_id = envelope
        .data
        .get("account_id")
        .and_then(serde_json::Value::as_str)
        .ok_or(KazooError::MalformedLogin {
            field: "data.account_id",
        })?;

    Ok(AuthToken::new(token, account_id, generation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, Password};

    #[test]
    fn test_credentials_hash_is_md5_of_user_colon_pass() {
        // md5("user:pass")
        assert_eq!(
            credentials_hash("user", "pass"),
            "21a39285884a268d6458e3fdeb08beac"
        );
    }

    #[test]
    fn test_api_key_login_request() {
        let credentials = Credentials::ApiKey(ApiKey::new("key-123").unwrap());
        let request = login_request(&credentials).unwrap();

        assert_eq!(request.http_method, HttpMethod::Put);
        assert_eq!(request.path, "/api_auth");
        assert!(!request.auth_required);
        assert_eq!(request.body, Some(json!({"api_key": "key-123"})));
    }

    #[test]
    fn test_password_login_request() {
        let credentials = Credentials::UserPassword {
            username: "user".to_string(),
            password: Password::new("pass").unwrap(),
            account_name: "acme".to_string(),
        };
        let request = login_request(&credentials).unwrap();

        assert_eq!(request.path, "/user_auth");
        assert!(!request.auth_required);
        assert_eq!(
            request.body,
            Some(json!({
                "credentials": "21a39285884a268d6458e3fdeb08beac",
                "account_name": "acme"
            }))
        );
    }

    #[test]
    fn test_token_from_envelope() {
        let envelope: Envelope = serde_json::from_value(json!({
            "auth_token": "tok-1",
            "status": "success",
            "data": {"account_id": "A1", "owner_id": "U1"}
        }))
        .unwrap();

        let token = token_from_envelope(&envelope, 4).unwrap();
        assert_eq!(token.token(), "tok-1");
        assert_eq!(token.account_id(), "A1");
        assert_eq!(token.generation(), 4);
    }

    #[test]
    fn test_missing_auth_token_is_malformed() {
        let envelope: Envelope = serde_json::from_value(json!({
            "status": "success",
            "data": {"account_id": "A1"}
        }))
        .unwrap();

        assert!(matches!(
            token_from_envelope(&envelope, 1),
            Err(KazooError::MalformedLogin { field: "auth_token" })
        ));
    }

    #[test]
    fn test_missing_account_id_is_malformed() {
        let envelope: Envelope = serde_json::from_value(json!({
            "auth_token": "tok-1",
            "data": {}
        }))
        .unwrap();

        assert!(matches!(
            token_from_envelope(&envelope, 1),
            Err(KazooError::MalformedLogin { field: "data.account_id" })
        ));
    }
}
