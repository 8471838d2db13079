//! Console context
//!
//! Owns every piece of session state for one running console. Session
//! status, the persisted token and the router position all live here and
//! are shared through cheap clones of the handles below.

use std::sync::Arc;

use console_admin::{CountryService, PermissionsService, UsersService};
use console_auth::{
    CredentialExchange, Navigator, RouteRecorder, SessionGuard, SessionStatus, SessionStore,
};
use console_http::RequestGateway;
use console_storage::{CookieJar, Database};

use crate::config::Config;
use crate::Result;

pub struct Console {
    config: Config,
    db: Database,
    router: RouteRecorder,
    session: SessionStore,
    exchange: CredentialExchange,
    guard: SessionGuard,
    gateway: RequestGateway,
    users: UsersService,
    permissions: PermissionsService,
    countries: CountryService,
}

impl Console {
    /// Open the console database and restore the persisted session
    pub fn new(config: Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        Self::with_database(config, db)
    }

    pub fn with_database(config: Config, db: Database) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        let router = RouteRecorder::new(config.enable_router_tracing);
        let session = SessionStore::new(
            CookieJar::new(db.clone()),
            Arc::new(router.clone()),
            config.session_settings(),
        );

        let exchange =
            CredentialExchange::new(client.clone(), config.authenticate_url(), session.clone());
        let guard = SessionGuard::new(session.clone());
        let gateway = RequestGateway::new(client, config.api_base(), session.clone());

        tracing::info!(
            api_host = %config.api_host,
            status = %session.current(),
            "Console initialized"
        );

        Ok(Self {
            users: UsersService::new(gateway.clone()),
            permissions: PermissionsService::new(gateway.clone()),
            countries: CountryService::new(gateway.clone()),
            config,
            db,
            router,
            session,
            exchange,
            guard,
            gateway,
        })
    }

    // === Session ===

    pub async fn login(&self, username: &str, password: &str) -> Result<SessionStatus> {
        Ok(self.exchange.login(username, password).await?)
    }

    pub fn logout(&self) {
        self.session.logout();
    }

    pub fn status(&self) -> SessionStatus {
        self.session.current()
    }

    pub fn can_enter(&self) -> bool {
        self.guard.can_enter()
    }

    // === Routing ===

    /// Move the router to `route` and return where it actually landed
    ///
    /// The logout route ends the session. The admin route and everything
    /// below it is guarded. Anything else is recorded as-is.
    pub fn navigate(&self, route: &str) -> String {
        let route = normalize_route(route);

        if route == self.config.logout_route {
            self.logout();
            let login_route = &self.config.login_route;
            if self.router.current().as_deref() != Some(login_route.as_str()) {
                self.router.navigate(login_route);
            }
            return login_route.clone();
        }

        if self.is_protected(&route) && !self.guard.can_enter() {
            return self.config.login_route.clone();
        }

        self.router.navigate(&route);
        route
    }

    pub fn current_route(&self) -> Option<String> {
        self.router.current()
    }

    pub fn route_history(&self) -> Vec<String> {
        self.router.history()
    }

    fn is_protected(&self, route: &str) -> bool {
        let admin = self.config.admin_route.trim_end_matches('/');
        route == admin
            || route
                .strip_prefix(admin)
                .is_some_and(|rest| rest.starts_with('/'))
    }

    // === Accessors ===

    pub fn users(&self) -> &UsersService {
        &self.users
    }

    pub fn permissions(&self) -> &PermissionsService {
        &self.permissions
    }

    pub fn countries(&self) -> &CountryService {
        &self.countries
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn gateway(&self) -> &RequestGateway {
        &self.gateway
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl Clone for Console {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            db: self.db.clone(),
            router: self.router.clone(),
            session: self.session.clone(),
            exchange: self.exchange.clone(),
            guard: self.guard.clone(),
            gateway: self.gateway.clone(),
            users: self.users.clone(),
            permissions: self.permissions.clone(),
            countries: self.countries.clone(),
        }
    }
}

/// Leading slash, no trailing slash (except for the root)
fn normalize_route(route: &str) -> String {
    let trimmed = route.trim().trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
