//! Request description

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::headers::Headers;
use crate::Result;

/// Request body; anything that is not already a string is sent as JSON
#[derive(Debug, Clone)]
pub enum RequestBody {
    Text(String),
    Json(Value),
}

impl RequestBody {
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(RequestBody::Json(serde_json::to_value(value)?))
    }

    pub(crate) fn into_string(self) -> Result<String> {
        match self {
            RequestBody::Text(text) => Ok(text),
            RequestBody::Json(value) => Ok(serde_json::to_string(&value)?),
        }
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        RequestBody::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        RequestBody::Text(text.to_string())
    }
}

impl From<Value> for RequestBody {
    fn from(value: Value) -> Self {
        RequestBody::Json(value)
    }
}

/// How the response body should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseKind {
    #[default]
    Json,
    Text,
    Bytes,
}

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: Option<Headers>,
    pub query: Vec<(String, String)>,
    pub response: ResponseKind,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_headers(mut self, headers: impl Into<Headers>) -> Self {
        self.headers = Some(headers.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn expecting(mut self, kind: ResponseKind) -> Self {
        self.response = kind;
        self
    }
}

/// Whether the method carries a request body
pub(crate) fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}
