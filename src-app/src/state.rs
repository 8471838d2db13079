//! Application state management
use console_core::{Config, Console, Result};
use std::path::Path;

/// The console the commands run against
pub struct AppState {
    console: Console,
}

impl AppState {
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path)?;
        Ok(Self::with_console(Console::new(config)?))
    }

    pub fn with_console(console: Console) -> Self {
        Self { console }
    }

    pub fn console(&self) -> &Console {
        &self.console
    }
}
