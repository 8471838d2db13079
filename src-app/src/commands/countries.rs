//! Country commands
use console_core::Country;

use super::CommandResult;
use crate::state::AppState;

pub async fn list_countries(state: &AppState) -> CommandResult<Vec<Country>> {
    match state.console().countries().list().await {
        Ok(countries) => CommandResult::ok(countries),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

pub async fn get_country(state: &AppState, country_id: i64) -> CommandResult<Country> {
    match state.console().countries().get_by_id(country_id).await {
        Ok(country) => CommandResult::ok(country),
        Err(e) => CommandResult::err(e.to_string()),
    }
}
