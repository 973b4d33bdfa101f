//! Token ownership and single-flight re-authentication.

use std::sync::{Mutex, PoisonError};

use crate::auth::login::{login_request, token_from_envelope};
use crate::auth::state::{AuthState, AuthToken};
use crate::clients::{Executor, KazooError};
use crate::config::Credentials;

/// Owns the current auth token and performs login exchanges.
///
/// At most one login exchange is in flight at any time. Callers that arrive
/// while a login is running wait for it and share its result.
///
/// # Thread Safety
///
/// `AuthManager` is `Send + Sync`.
#[derive(Debug)]
pub struct AuthManager {
    credentials: Credentials,
    executor: Executor,
    state: Mutex<AuthState>,
    generation: Mutex<u64>,
    login_lock: tokio::sync::Mutex<()>,
}

// Verify AuthManager is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthManager>();
};

impl AuthManager {
    /// Creates a manager in the [`AuthState::Unauthenticated`] state.
    #[must_use]
    pub fn new(credentials: Credentials, executor: Executor) -> Self {
        Self {
            credentials,
            executor,
            state: Mutex::new(AuthState::Unauthenticated),
            generation: Mutex::new(0),
            login_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the held token without logging in.
    #[must_use]
    pub fn current(&self) -> Option<AuthToken> {
        self.state().token().cloned()
    }

    /// Returns the account id bound to the held token.
    #[must_use]
    pub fn account_id(&self) -> Option<String> {
        self.current().map(|token| token.account_id().to_string())
    }

    /// Returns the held token, logging in first if there is none.
    ///
    /// # Errors
    ///
    /// Returns the login exchange's error; the state reverts to
    /// [`AuthState::Unauthenticated`].
    pub async fn authenticate(&self) -> Result<AuthToken, KazooError> {
        if let Some(token) = self.current() {
            return Ok(token);
        }

        let _guard = self.login_lock.lock().await;
        if let Some(token) = self.current() {
            return Ok(token);
        }
        self.login().await
    }

    /// Replaces `stale` with a fresh token.
    ///
    /// If another caller already replaced `stale` while this one waited, the
    /// newer token is returned without a second login.
    ///
    /// # Errors
    ///
    /// Returns the login exchange's error; the state reverts to
    /// [`AuthState::Unauthenticated`].
    pub async fn reauthenticate(&self, stale: Option<&AuthToken>) -> Result<AuthToken, KazooError> {
        let _guard = self.login_lock.lock().await;

        if let Some(current) = self.current() {
            let replaced = stale.is_some_and(|stale| current.generation() > stale.generation());
            if replaced {
                tracing::debug!(
                    "Token already refreshed to generation {}; skipping login",
                    current.generation()
                );
                return Ok(current);
            }
        }

        self.login().await
    }

    /// Drops the held token.
    pub fn invalidate(&self) {
        self.set_state(AuthState::Unauthenticated);
    }

    async fn login(&self) -> Result<AuthToken, KazooError> {
        self.set_state(AuthState::Authenticating);
        let mut pending = PendingLogin {
            state: &self.state,
            settled: false,
        };

        let result = self.exchange().await;
        pending.settled = true;

        match result {
            Ok(token) => {
                tracing::info!(
                    "Authenticated against {} as account {}",
                    self.executor.base_url(),
                    token.account_id()
                );
                self.set_state(AuthState::Authenticated(token.clone()));
                Ok(token)
            }
            Err(e) => {
                tracing::warn!("Kazoo login failed: {}", e);
                self.set_state(AuthState::Unauthenticated);
                Err(e)
            }
        }
    }

    async fn exchange(&self) -> Result<AuthToken, KazooError> {
        let request = login_request(&self.credentials)?;
        let envelope = self.executor.execute(&request, None).await?;
        token_from_envelope(&envelope, self.next_generation())
    }

    fn next_generation(&self) -> u64 {
        let mut generation = self
            .generation
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *generation += 1;
        *generation
    }

    fn set_state(&self, state: AuthState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

/// Resets the state to `Unauthenticated` when a login future is dropped
/// before the exchange completes.
struct PendingLogin<'a> {
    state: &'a Mutex<AuthState>,
    settled: bool,
}

impl Drop for PendingLogin<'_> {
    fn drop(&mut self) {
        if !self.settled {
            *self.state.lock().unwrap_or_else(PoisonError::into_inner) =
                AuthState::Unauthenticated;
        }
    }
}
