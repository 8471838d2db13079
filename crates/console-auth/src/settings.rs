//! Session settings

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Cookie key the session token is stored under
    pub session_key: String,
    /// Days a freshly issued token stays valid
    pub expire_in_days: u32,
    /// Route of the protected admin area
    pub admin_route: String,
    /// Route of the login view
    pub login_route: String,
    /// Pause between persisting a token and announcing LOGGED_IN
    pub settle_delay: Duration,
}

impl SessionSettings {
    pub fn route_for(&self, destination: crate::Destination) -> &str {
        match destination {
            crate::Destination::Admin => &self.admin_route,
            crate::Destination::Login => &self.login_route,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            session_key: "u_session_id".to_string(),
            expire_in_days: 14,
            admin_route: "/admin".to_string(),
            login_route: "/login".to_string(),
            settle_delay: Duration::from_millis(100),
        }
    }
}
