//! Session commands
use console_core::SessionStatus;
use serde::Serialize;

use super::CommandResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub status: SessionStatus,
    pub logged_in: bool,
    pub has_token: bool,
    pub route: Option<String>,
}

impl SessionInfo {
    fn capture(state: &AppState) -> Self {
        let console = state.console();
        let status = console.status();
        Self {
            status,
            logged_in: status.is_logged_in(),
            has_token: console.session().has_token(),
            route: console.current_route(),
        }
    }
}

pub async fn login(state: &AppState, username: &str, password: &str) -> CommandResult<SessionInfo> {
    match state.console().login(username, password).await {
        Ok(_) => CommandResult::ok(SessionInfo::capture(state)),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub fn logout(state: &AppState) -> CommandResult<SessionInfo> {
    state.console().logout();
    CommandResult::ok(SessionInfo::capture(state))
}

pub fn status(state: &AppState) -> CommandResult<SessionInfo> {
    CommandResult::ok(SessionInfo::capture(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_core::{Config, Console, Database};
    use serde_json::json;
    use std::path::PathBuf;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_state(server: &MockServer) -> AppState {
        let mut config = Config::new(PathBuf::from(":memory:"));
        config.api_host = server.uri();
        config.login_settle_delay_ms = 1;
        let console = Console::with_database(config, Database::open_in_memory().unwrap()).unwrap();
        AppState::with_console(console)
    }

    #[tokio::test]
    async fn test_login_reports_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/authenticate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "abc123" })))
            .mount(&server)
            .await;

        let state = test_state(&server);
        let result = login(&state, "alice", "correct").await;

        assert!(result.success);
        let info = result.data.unwrap();
        assert_eq!(info.status, SessionStatus::LoggedIn);
        assert!(info.has_token);
        assert_eq!(info.route.as_deref(), Some("/admin"));

        let info = logout(&state).data.unwrap();
        assert_eq!(info.status, SessionStatus::Logout);
        assert!(!info.has_token);
    }

    #[tokio::test]
    async fn test_rejected_login_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/authenticate"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let state = test_state(&server);
        let result = login(&state, "alice", "wrong").await;

        assert!(!result.success);
        assert!(result.error.is_some());
        assert_eq!(
            status(&state).data.unwrap().status,
            SessionStatus::InvalidCredentials
        );
    }
}
