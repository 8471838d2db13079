//! Routing commands
use console_core::SessionStatus;
use serde::Serialize;

use super::CommandResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RouteInfo {
    pub requested: String,
    pub landed: String,
    pub status: SessionStatus,
}

pub fn navigate(state: &AppState, route: String) -> CommandResult<RouteInfo> {
    let console = state.console();
    let landed = console.navigate(&route);
    CommandResult::ok(RouteInfo {
        requested: route,
        landed,
        status: console.status(),
    })
}
