//! Header containers and patching

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::GatewayError;
use crate::Result;

/// Headers a caller may attach to a request
///
/// `Raw` is what arrives from loosely typed callers (IPC payloads, config
/// files): it must be a JSON object of name to string or list of strings.
#[derive(Debug, Clone)]
pub enum Headers {
    Map(HeaderMap),
    Raw(Value),
}

impl From<HeaderMap> for Headers {
    fn from(map: HeaderMap) -> Self {
        Headers::Map(map)
    }
}

impl From<Value> for Headers {
    fn from(value: Value) -> Self {
        Headers::Raw(value)
    }
}

impl From<HashMap<String, String>> for Headers {
    fn from(map: HashMap<String, String>) -> Self {
        let fields: Map<String, Value> = map
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect();
        Headers::Raw(Value::Object(fields))
    }
}

/// Build the outgoing header map
///
/// `Content-Type: application/json` is added unless the caller set one.
/// `Authorization` always reflects the session token, and is dropped when
/// there is none.
pub fn patch_headers(headers: Option<Headers>, token: Option<&str>) -> Result<HeaderMap> {
    let mut map = match headers {
        None => HeaderMap::new(),
        Some(Headers::Map(map)) => map,
        Some(Headers::Raw(Value::Object(fields))) => from_fields(fields)?,
        Some(Headers::Raw(other)) => {
            return Err(GatewayError::Configuration(format!(
                "unknown headers type: {}",
                json_kind(&other)
            )))
        }
    };

    if !map.contains_key(CONTENT_TYPE) {
        map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    match token {
        Some(token) => {
            let mut value = HeaderValue::from_str(token).map_err(|_| {
                GatewayError::Configuration("session token is not a valid header value".into())
            })?;
            value.set_sensitive(true);
            map.insert(AUTHORIZATION, value);
        }
        None => {
            map.remove(AUTHORIZATION);
        }
    }

    Ok(map)
}

fn from_fields(fields: Map<String, Value>) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(fields.len());

    for (name, value) in fields {
        let header = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| GatewayError::Configuration(format!("invalid header name: {name}")))?;

        let values = match value {
            Value::String(s) => vec![s],
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(invalid_value(&name, &other)),
                })
                .collect::<Result<Vec<_>>>()?,
            other => return Err(invalid_value(&name, &other)),
        };

        for value in values {
            let value = HeaderValue::from_str(&value).map_err(|_| {
                GatewayError::Configuration(format!("invalid value for header {name}"))
            })?;
            map.append(header.clone(), value);
        }
    }

    Ok(map)
}

fn invalid_value(name: &str, value: &Value) -> GatewayError {
    GatewayError::Configuration(format!(
        "header {name} must be a string or list of strings, got {}",
        json_kind(value)
    ))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
