//! Reconciliation step
//!
//! Compares the status just entered with whether a session token is
//! persisted and says what has to happen next. Pure, so the whole table is
//! testable without a store.

use crate::status::SessionStatus;

/// Area of the console a reconciliation step sends the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Admin,
    Login,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reconciliation {
    /// Remove the persisted token
    pub clear_token: bool,
    /// Navigate after the token has been handled
    pub navigate: Option<Destination>,
    /// Follow-up transition
    pub next: Option<SessionStatus>,
}

impl Reconciliation {
    pub fn is_settled(&self) -> bool {
        *self == Reconciliation::default()
    }
}

pub fn reconcile(status: SessionStatus, token_present: bool) -> Reconciliation {
    match (status, token_present) {
        (SessionStatus::Login, true) => Reconciliation {
            next: Some(SessionStatus::LoggedIn),
            ..Default::default()
        },
        (SessionStatus::LoggedIn, false) => Reconciliation {
            clear_token: true,
            next: Some(SessionStatus::Login),
            ..Default::default()
        },
        (SessionStatus::LoggedIn, true) => Reconciliation {
            navigate: Some(Destination::Admin),
            ..Default::default()
        },
        (status, _) if status.is_terminal() => Reconciliation {
            clear_token: true,
            navigate: Some(Destination::Login),
            next: None,
        },
        _ => Reconciliation::default(),
    }
}
