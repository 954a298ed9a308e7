//! Session lifecycle management.
//!
//! `SessionManager` owns the observable authentication state and is the only
//! writer of the credential slot and the client token. Every transition runs
//! in a fixed order: establishment persists the credential, configures the
//! client, then flips the in-memory state; teardown runs the reverse and
//! always clears all three layers together.

use tracing::{debug, warn};

use crate::api::{ApiClient, AuthRejection};
use crate::auth::CredentialStore;
use crate::models::{RegistrationRequest, UserProfile};

/// Authentication state as seen by callers.
/// `Restoring` is only observable while `initialize` is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Restoring,
    Authenticated,
}

pub struct SessionManager {
    api: ApiClient,
    store: CredentialStore,
    state: SessionState,
    current_user: Option<UserProfile>,
}

impl SessionManager {
    pub fn new(api: ApiClient, store: CredentialStore) -> Self {
        Self {
            api,
            store,
            state: SessionState::Unauthenticated,
            current_user: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.current_user.as_ref()
    }

    /// The shared client, carrying the current token. Pages use this for
    /// catalog requests; they must not mutate session state through it.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Re-establish a session from a previously persisted token.
    ///
    /// Runs once at startup. With no token in the slot, no profile request
    /// is issued. Any failure of the profile fetch - expired, malformed, or
    /// revoked token alike - silently resolves to logged-out: the recovery
    /// path fails closed and fails quiet.
    pub async fn initialize(&mut self) {
        let Some(token) = self.store.get() else {
            debug!("No persisted token, starting unauthenticated");
            return;
        };

        self.state = SessionState::Restoring;
        self.api.set_token(token);

        match self.api.fetch_profile().await {
            Ok(user) => {
                debug!(username = %user.username, "Session restored");
                self.current_user = Some(user);
                self.state = SessionState::Authenticated;
            }
            Err(e) => {
                debug!(error = %e, "Session restore failed, clearing credentials");
                self.teardown();
            }
        }
    }

    /// Exchange credentials for a session.
    ///
    /// On rejection the prior state is left untouched and the server's
    /// error payload is returned in normalized form.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<&UserProfile, AuthRejection> {
        let payload = self.api.login(username, password).await?;
        debug!(username = %payload.user.username, "Login succeeded");
        Ok(self.establish(payload.token, payload.user))
    }

    /// Create an account and start a session from the response's own
    /// token/user pair. Identical contract to `login`.
    pub async fn register(
        &mut self,
        request: &RegistrationRequest,
    ) -> Result<&UserProfile, AuthRejection> {
        let payload = self.api.register(request).await?;
        debug!(username = %payload.user.username, "Registration succeeded");
        Ok(self.establish(payload.token, payload.user))
    }

    /// Unconditional local teardown: credential slot, client token, and
    /// in-memory state are cleared together. No backend call. Safe to call
    /// when already unauthenticated.
    pub fn logout(&mut self) {
        self.teardown();
    }

    /// Fixed establishment order: persist credential, configure client,
    /// flip in-memory state. A failed persist does not abort the session -
    /// it only means the session won't survive a restart.
    fn establish(&mut self, token: String, user: UserProfile) -> &UserProfile {
        if let Err(e) = self.store.set(&token) {
            warn!(error = %e, "Failed to persist token; session will not survive restart");
        }
        self.api.set_token(token);
        self.state = SessionState::Authenticated;
        self.current_user.insert(user)
    }

    /// Reverse of `establish`: drop in-memory state, clear the client
    /// token, then empty the credential slot.
    fn teardown(&mut self) {
        self.current_user = None;
        self.state = SessionState::Unauthenticated;
        self.api.clear_token();
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear persisted token");
        }
    }
}
