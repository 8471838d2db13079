//! Console configuration
//!
//! Resolved once at start-up: built-in defaults, then an optional JSON file,
//! then `CONSOLE_*` environment overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use console_auth::SessionSettings;

use crate::error::CoreError;
use crate::Result;

pub const ENV_API_HOST: &str = "CONSOLE_API_HOST";
pub const ENV_SESSION_KEY: &str = "CONSOLE_SESSION_KEY";
pub const ENV_ROUTER_TRACING: &str = "CONSOLE_ROUTER_TRACING";

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the database file holding the cookie jar
    pub database_path: PathBuf,
    /// Base URL of the users API
    pub api_host: String,
    pub admin_route: String,
    pub login_route: String,
    pub logout_route: String,
    /// Cookie key the session token is stored under
    pub session_key: String,
    pub session_expire_in_days: u32,
    /// Log every navigation at info level
    pub enable_router_tracing: bool,
    pub login_settle_delay_ms: u64,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("console.db"),
            api_host: "http://localhost:9000".to_string(),
            admin_route: "/admin".to_string(),
            login_route: "/login".to_string(),
            logout_route: "/logout".to_string(),
            session_key: "u_session_id".to_string(),
            session_expire_in_days: 14,
            enable_router_tracing: false,
            login_settle_delay_ms: 100,
            request_timeout_secs: 30,
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("AdminConsole"))
            .unwrap_or_else(|| PathBuf::from(".admin-console"))
    }

    /// Resolve the configuration
    ///
    /// An explicit `path` must exist. Without one, `config.json` in the data
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::data_dir().join(CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        tracing::debug!(api_host = %config.api_host, database = %config.database_path.display(), "Configuration loaded");

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Apply `CONSOLE_*` overrides from `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_API_HOST) {
            self.api_host = host;
        }
        if let Some(key) = lookup(ENV_SESSION_KEY) {
            self.session_key = key;
        }
        if let Some(flag) = lookup(ENV_ROUTER_TRACING) {
            match parse_flag(&flag) {
                Some(enabled) => self.enable_router_tracing = enabled,
                None => tracing::warn!(value = %flag, "Ignoring unrecognised {}", ENV_ROUTER_TRACING),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api_host)
            .map_err(|e| CoreError::Config(format!("invalid api_host {:?}: {}", self.api_host, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::Config(format!(
                "api_host must be http or https, got {}",
                url.scheme()
            )));
        }

        if self.session_key.trim().is_empty() {
            return Err(CoreError::Config("session_key cannot be empty".to_string()));
        }
        if self.session_expire_in_days == 0 {
            return Err(CoreError::Config(
                "session_expire_in_days must be at least 1".to_string(),
            ));
        }

        for (name, route) in [
            ("admin_route", &self.admin_route),
            ("login_route", &self.login_route),
            ("logout_route", &self.logout_route),
        ] {
            if !route.starts_with('/') {
                return Err(CoreError::Config(format!("{name} must start with '/'")));
            }
        }

        Ok(())
    }

    /// The API host without a trailing slash
    pub fn api_base(&self) -> &str {
        self.api_host.trim_end_matches('/')
    }

    pub fn authenticate_url(&self) -> String {
        format!("{}/authenticate", self.api_base())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            session_key: self.session_key.clone(),
            expire_in_days: self.session_expire_in_days,
            admin_route: self.admin_route.clone(),
            login_route: self.login_route.clone(),
            settle_delay: Duration::from_millis(self.login_settle_delay_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::new(PathBuf::from("/tmp/console"));
        assert_eq!(config.database_path, PathBuf::from("/tmp/console/console.db"));
        assert_eq!(config.api_host, "http://localhost:9000");
        assert_eq!(config.session_key, "u_session_id");
        assert_eq!(config.session_expire_in_days, 14);
        assert!(!config.enable_router_tracing);
        assert_eq!(config.authenticate_url(), "http://localhost:9000/authenticate");
        config.validate().unwrap();

        let settings = config.session_settings();
        assert_eq!(settings.login_route, "/login");
        assert_eq!(settings.settle_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_file_values_fill_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "api_host": "https://users.example.com/", "session_expire_in_days": 7 }}"#
        )
        .unwrap();

        let mut config = Config::from_file(file.path()).unwrap();
        config.apply_overrides(|_| None);
        config.validate().unwrap();
        assert_eq!(config.api_base(), "https://users.example.com");
        assert_eq!(config.session_expire_in_days, 7);
        assert_eq!(config.login_route, "/login");
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("nope.json")));
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_API_HOST, "http://10.0.0.5:9000"),
            (ENV_SESSION_KEY, "sid"),
            (ENV_ROUTER_TRACING, "on"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::new(PathBuf::from("/tmp"));
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_host, "http://10.0.0.5:9000");
        assert_eq!(config.session_key, "sid");
        assert!(config.enable_router_tracing);

        config.apply_overrides(|key| (key == ENV_ROUTER_TRACING).then(|| "maybe".to_string()));
        assert!(config.enable_router_tracing);

        config.apply_overrides(|key| (key == ENV_ROUTER_TRACING).then(|| "0".to_string()));
        assert!(!config.enable_router_tracing);
    }

    #[test]
    fn test_validation() {
        let mut config = Config::new(PathBuf::from("/tmp"));
        config.api_host = "not a url".to_string();
        assert!(config.validate().is_err());

        config.api_host = "ftp://localhost".to_string();
        assert!(config.validate().is_err());

        config.api_host = "http://localhost:9000".to_string();
        config.admin_route = "admin".to_string();
        assert!(config.validate().is_err());

        config.admin_route = "/admin".to_string();
        config.session_expire_in_days = 0;
        assert!(config.validate().is_err());
    }
}
