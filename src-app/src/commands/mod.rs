//! Console commands
//!
//! Each command runs against the shared `AppState` and reports a
//! `CommandResult` that the shell prints as JSON.

pub mod auth;
pub mod countries;
pub mod navigation;
pub mod permissions;
pub mod users;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_result_shape() {
        let ok = serde_json::to_value(CommandResult::ok(3)).unwrap();
        assert_eq!(ok, json!({ "success": true, "data": 3, "error": null }));

        let err = serde_json::to_value(CommandResult::<()>::err("boom".into())).unwrap();
        assert_eq!(err, json!({ "success": false, "data": null, "error": "boom" }));
    }
}
