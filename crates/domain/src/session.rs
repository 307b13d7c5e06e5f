//! Authentication collaborator.
//!
//! Login, registration, and token issuance happen elsewhere; this module only
//! holds the resulting session and answers "is anyone signed in".

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

/// Role name that grants admin screens.
pub const ADMIN_ROLE: &str = "ADMIN";

/// An authenticated identity issued by the auth service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub roles: Vec<String>,
    /// Bearer token sent with authenticated requests.
    pub token: String,
}

impl Session {
    pub fn new(
        username: impl Into<String>,
        roles: Vec<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            roles,
            token: token.into(),
        }
    }

    /// Returns true if the session carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == ADMIN_ROLE)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("roles", &self.roles)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Source of the current identity.
pub trait IdentityProvider: Send + Sync {
    /// Returns the signed-in session, if any.
    fn current(&self) -> Option<Session>;
}

/// In-process session holder.
///
/// Clones share the same slot, so signing out through one handle is visible
/// to every consumer constructed with another.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    /// Creates a store with nobody signed in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that is already signed in.
    pub fn signed_in(session: Session) -> Self {
        let store = Self::new();
        store.sign_in(session);
        store
    }

    /// Replaces the current session.
    pub fn sign_in(&self, session: Session) {
        tracing::info!(username = %session.username, "signed in");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    /// Drops the current session.
    pub fn sign_out(&self) {
        let previous = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(session) = previous {
            tracing::info!(username = %session.username, "signed out");
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.current().is_some()
    }
}

impl IdentityProvider for SessionStore {
    fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
