//! Entity decoding
//!
//! The admin API returns loosely shaped JSON. A single entity must be a
//! non-empty object; a list must be an array of such objects.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::AdminError;
use crate::Result;

pub fn decode_entity<T: DeserializeOwned>(value: Value) -> Result<T> {
    match &value {
        Value::Array(_) => {
            return Err(AdminError::InvalidEntity("type cannot be array".into()));
        }
        Value::Object(fields) if fields.is_empty() => {
            return Err(AdminError::InvalidEntity("object cannot be empty".into()));
        }
        Value::Object(_) => {}
        other => {
            return Err(AdminError::InvalidEntity(format!(
                "expected an object, got {other}"
            )));
        }
    }

    Ok(serde_json::from_value(value)?)
}

pub fn decode_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>> {
    match value {
        Value::Array(items) => items.into_iter().map(decode_entity::<T>).collect(),
        other => Err(AdminError::InvalidEntity(format!(
            "expected a list, got {}",
            if other.is_object() { "an object" } else { "a scalar" }
        ))),
    }
}
