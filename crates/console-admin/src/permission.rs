//! Permissions resource

use console_http::{Method, RequestGateway};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entity::decode_list;
use crate::Result;

/// A permission as the API reports it; unknown attributes are kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub permission_id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

pub struct PermissionsService {
    gateway: RequestGateway,
}

impl PermissionsService {
    pub fn new(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<Permission>> {
        let body = self
            .gateway
            .fetch::<Value>(Method::GET, "/permissions", None)
            .await?;
        decode_list(body)
    }
}

impl Clone for PermissionsService {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}
