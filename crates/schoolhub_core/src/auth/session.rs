//! Session store for one running client.
//!
//! # Responsibility
//! - Authenticate login pairs against the owned credential directory.
//! - Hold the current identity until logout.
//!
//! # Invariants
//! - `current` is either `None` or exactly one authenticated session.
//! - A rejected login leaves `current` untouched, including an existing
//!   session.
//! - Session state is never persisted.

use crate::auth::credentials::CredentialDirectory;
use crate::model::identity::Identity;
use log::{info, warn};
use uuid::Uuid;

/// One authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    session_id: Uuid,
    identity: Identity,
}

impl Session {
    /// Random id used to correlate log events; not a bearer token.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }
}

/// Owner of the current identity.
///
/// Created once per client and passed to whatever needs it; there is no
/// process-global session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    directory: CredentialDirectory,
    current: Option<Session>,
}

impl SessionStore {
    /// Creates an unauthenticated store over `directory`.
    pub fn new(directory: CredentialDirectory) -> Self {
        Self {
            directory,
            current: None,
        }
    }

    /// Attempts to authenticate with an exact email/password pair.
    ///
    /// # Contract
    /// - Match: the matched identity becomes current, returns `true`.
    /// - No match: returns `false` and leaves any existing session in place.
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        let Some(identity) = self.directory.authenticate(email, password) else {
            warn!(
                "event=login module=session status=rejected authenticated={}",
                self.current.is_some()
            );
            return false;
        };

        let session = Session {
            session_id: Uuid::new_v4(),
            identity: identity.clone(),
        };
        info!(
            "event=login module=session status=ok session_id={} user_id={}",
            session.session_id, session.identity.id
        );
        if let Some(previous) = self.current.replace(session) {
            info!(
                "event=session_replaced module=session status=ok previous_session_id={}",
                previous.session_id
            );
        }
        true
    }

    /// Clears the current identity. Safe to call when already logged out.
    pub fn logout(&mut self) {
        match self.current.take() {
            Some(session) => info!(
                "event=logout module=session status=ok session_id={}",
                session.session_id
            ),
            None => info!("event=logout module=session status=noop"),
        }
    }

    pub fn current_identity(&self) -> Option<&Identity> {
        self.current.as_ref().map(Session::identity)
    }

    pub fn current_session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn directory(&self) -> &CredentialDirectory {
        &self.directory
    }
}

#[cfg(test)]
mod tests {
    use super::SessionStore;
    use crate::auth::credentials::{CredentialDirectory, DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD};

    #[test]
    fn new_store_is_unauthenticated() {
        let store = SessionStore::new(CredentialDirectory::demo());
        assert!(!store.is_authenticated());
        assert!(store.current_identity().is_none());
        assert!(store.current_session().is_none());
    }

    #[test]
    fn each_login_starts_a_fresh_session_id() {
        let mut store = SessionStore::new(CredentialDirectory::demo());
        assert!(store.login(DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD));
        let first = store.current_session().unwrap().session_id();

        assert!(store.login(DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD));
        let second = store.current_session().unwrap().session_id();
        assert_ne!(first, second);
    }
}
