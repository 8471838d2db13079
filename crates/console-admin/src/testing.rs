use std::sync::Arc;

use console_auth::{RouteRecorder, SessionSettings, SessionStore};
use console_http::RequestGateway;
use console_storage::{CookieJar, Database};
use wiremock::MockServer;

pub(crate) struct Fixture {
    pub server: MockServer,
    pub gateway: RequestGateway,
}

impl Fixture {
    pub async fn start(token: Option<&str>) -> Self {
        let server = MockServer::start().await;
        let cookies = CookieJar::new(Database::open_in_memory().unwrap());
        if let Some(token) = token {
            cookies.set("u_session_id", token, 14).unwrap();
        }
        let session = SessionStore::new(
            cookies,
            Arc::new(RouteRecorder::default()),
            SessionSettings::default(),
        );
        let gateway = RequestGateway::new(reqwest::Client::new(), server.uri(), session);
        Self { server, gateway }
    }
}
