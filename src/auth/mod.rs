//! Authentication for the Kazoo API.
//!
//! Kazoo authenticates requests with an `X-Auth-Token` header. Tokens are
//! obtained from a login exchange using either an API key or a
//! username/password/account-name triple (see [`Credentials`]).
//!
//! # Overview
//!
//! - [`AuthToken`]: A token, the account it belongs to, and when it was issued
//! - [`AuthState`]: `Unauthenticated`, `Authenticating` or `Authenticated`
//! - [`AuthManager`]: Owns the state and performs single-flight logins
//! - [`login_request`] / [`credentials_hash`]: The login exchange itself
//!
//! # Re-authentication
//!
//! When a request is rejected with an authentication error, the client calls
//! [`AuthManager::reauthenticate`] with the token that was rejected. If a
//! concurrent caller has already replaced that token, the replacement is
//! returned and no second login happens.
//!
//! [`Credentials`]: crate::Credentials

mod login;
mod manager;
mod state;

pub use login::{credentials_hash, login_request, token_from_envelope, API_AUTH_PATH, USER_AUTH_PATH};
pub use manager::AuthManager;
pub use state::{AuthState, AuthToken};
