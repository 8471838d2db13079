//! Response wrapper

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::request::ResponseKind;
use crate::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: ResponseBody,
}

impl ApiResponse {
    pub(crate) async fn read(response: reqwest::Response, kind: ResponseKind) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();

        let body = match kind {
            ResponseKind::Json => {
                let bytes = response.bytes().await?;
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    ResponseBody::Json(Value::Null)
                } else {
                    ResponseBody::Json(serde_json::from_slice(&bytes)?)
                }
            }
            ResponseKind::Text => ResponseBody::Text(response.text().await?),
            ResponseKind::Bytes => ResponseBody::Bytes(response.bytes().await?.to_vec()),
        };

        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// Decode the body into `T`; text bodies are parsed as JSON
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        match self.body {
            ResponseBody::Json(value) => Ok(serde_json::from_value(value)?),
            ResponseBody::Text(text) => Ok(serde_json::from_str(&text)?),
            ResponseBody::Bytes(bytes) => Ok(serde_json::from_slice(&bytes)?),
        }
    }

    pub fn into_value(self) -> Result<Value> {
        self.json()
    }
}
