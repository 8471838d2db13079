//! Session status
//!
//! ```text
//! LOGIN ──submit──▶ LOGIN_ATTEMPT ──ok──▶ LOGGED_IN ──logout / 401──▶ LOGOUT
//!                        │
//!                        └──rejected──▶ INVALID_CREDENTIALS
//! ```
//!
//! Any status may be entered from any other; the store's reconciliation
//! step is what keeps the status honest against the persisted token.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// Unauthenticated, no attempt made yet
    Login,
    /// Credentials submitted, waiting for the server
    LoginAttempt,
    /// A valid session token is held
    LoggedIn,
    /// The last attempt was rejected
    InvalidCredentials,
    /// Session ended, explicitly or forced by a 401
    Logout,
}

impl SessionStatus {
    pub const ALL: [SessionStatus; 5] = [
        SessionStatus::Login,
        SessionStatus::LoginAttempt,
        SessionStatus::LoggedIn,
        SessionStatus::InvalidCredentials,
        SessionStatus::Logout,
    ];

    pub fn is_logged_in(&self) -> bool {
        matches!(self, SessionStatus::LoggedIn)
    }

    /// Statuses after which the persisted token must not survive
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionStatus::InvalidCredentials | SessionStatus::Logout
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Login => "LOGIN",
            SessionStatus::LoginAttempt => "LOGIN_ATTEMPT",
            SessionStatus::LoggedIn => "LOGGED_IN",
            SessionStatus::InvalidCredentials => "INVALID_CREDENTIALS",
            SessionStatus::Logout => "LOGOUT",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOGIN" => Ok(SessionStatus::Login),
            "LOGIN_ATTEMPT" => Ok(SessionStatus::LoginAttempt),
            "LOGGED_IN" => Ok(SessionStatus::LoggedIn),
            "INVALID_CREDENTIALS" => Ok(SessionStatus::InvalidCredentials),
            "LOGOUT" => Ok(SessionStatus::Logout),
            _ => Err(format!("Unknown session status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for status in SessionStatus::ALL {
            assert_eq!(status.as_str().parse::<SessionStatus>(), Ok(status));
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert!("logged_in".parse::<SessionStatus>().is_ok());
        assert!("SIGNED_IN".parse::<SessionStatus>().is_err());
    }

    #[test]
    fn test_only_logged_in_is_logged_in() {
        let logged_in: Vec<_> = SessionStatus::ALL
            .into_iter()
            .filter(SessionStatus::is_logged_in)
            .collect();
        assert_eq!(logged_in, vec![SessionStatus::LoggedIn]);
    }
}
