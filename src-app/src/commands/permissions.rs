//! Permission commands
use console_core::Permission;

use super::CommandResult;
use crate::state::AppState;

pub async fn list_permissions(state: &AppState) -> CommandResult<Vec<Permission>> {
    match state.console().permissions().list().await {
        Ok(permissions) => CommandResult::ok(permissions),
        Err(e) => CommandResult::err(e.to_string()),
    }
}
