//! User management commands
use console_core::User;

use super::CommandResult;
use crate::state::AppState;

pub async fn list_users(state: &AppState) -> CommandResult<Vec<User>> {
    match state.console().users().list().await {
        Ok(users) => CommandResult::ok(users),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub async fn get_user(state: &AppState, user_id: i64) -> CommandResult<User> {
    match state.console().users().get_by_id(user_id).await {
        Ok(user) => CommandResult::ok(user),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub async fn save_user(state: &AppState, json: &str) -> CommandResult<User> {
    let user: User = match serde_json::from_str(json) {
        Ok(user) => user,
        Err(e) => return CommandResult::err(format!("invalid user document: {e}")),
    };

    match state.console().users().save(&user).await {
        Ok(saved) => CommandResult::ok(saved),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub async fn delete_user(state: &AppState, user_id: i64) -> CommandResult<i64> {
    match state.console().users().delete(user_id).await {
        Ok(()) => CommandResult::ok(user_id),
        Err(e) => CommandResult::err(e.to_string()),
    }
}
