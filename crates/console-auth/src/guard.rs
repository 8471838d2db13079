//! Route guard for the protected admin area

use crate::store::SessionStore;

/// Checks the session before a protected view is entered
///
/// Only the in-memory status is consulted; the store has already
/// reconciled it against the persisted token.
pub struct SessionGuard {
    session: SessionStore,
}

impl SessionGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    /// True when logged in; otherwise redirects to the login view
    pub fn can_enter(&self) -> bool {
        if self.session.is_logged_in() {
            return true;
        }

        let login_route = &self.session.settings().login_route;
        tracing::debug!(
            status = %self.session.current(),
            redirect = %login_route,
            "Protected route denied"
        );
        self.session.navigator().navigate(login_route);
        false
    }
}

impl Clone for SessionGuard {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
        }
    }
}
