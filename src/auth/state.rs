//! Authentication state.

use std::fmt;

use chrono::{DateTime, Utc};

/// A token obtained from a successful login exchange.
///
/// The token value is masked in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    token: String,
    account_id: String,
    obtained_at: DateTime<Utc>,
    generation: u64,
}

impl AuthToken {
    /// Creates a token record stamped with the current time.
    #[must_use]
    pub fn new(token: impl Into<String>, account_id: impl Into<String>, generation: u64) -> Self {
        Self {
            token: token.into(),
            account_id: account_id.into(),
            obtained_at: Utc::now(),
            generation,
        }
    }

    /// Returns the value sent in the `X-Auth-Token` header.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the account the credentials belong to.
    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Returns when the login exchange completed.
    #[must_use]
    pub const fn obtained_at(&self) -> DateTime<Utc> {
        self.obtained_at
    }

    /// Returns the login sequence number that produced this token.
    ///
    /// Each successful login increments the generation, so two tokens with
    /// the same generation came from the same exchange.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("token", &"*****")
            .field("account_id", &self.account_id)
            .field("obtained_at", &self.obtained_at)
            .field("generation", &self.generation)
            .finish()
    }
}

/// Where the client is in the login lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// No token; the next authenticated request triggers a login.
    #[default]
    Unauthenticated,
    /// A login exchange is in flight.
    Authenticating,
    /// A token is held.
    Authenticated(AuthToken),
}

impl AuthState {
    /// Returns the held token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&AuthToken> {
        match self {
            Self::Authenticated(token) => Some(token),
            _ => None,
        }
    }

    /// Returns `true` if a token is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_masks_token() {
        let token = AuthToken::new("secret-token", "A1", 1);
        let debug = format!("{token:?}");

        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("*****"));
        assert!(debug.contains("A1"));
    }

    #[test]
    fn test_obtained_at_is_recent() {
        let before = Utc::now();
        let token = AuthToken::new("t", "A1", 1);
        assert!(token.obtained_at() >= before);
        assert!(token.obtained_at() <= Utc::now());
    }

    #[test]
    fn test_state_accessors() {
        assert!(!AuthState::Unauthenticated.is_authenticated());
        assert!(AuthState::Authenticating.token().is_none());

        let state = AuthState::Authenticated(AuthToken::new("t", "A1", 3));
        assert!(state.is_authenticated());
        assert_eq!(state.token().unwrap().generation(), 3);
    }
}
