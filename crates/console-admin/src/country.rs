//! Countries resource

use console_http::{Method, RequestGateway};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::{decode_entity, decode_list};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub country_id: i64,
    pub iso: String,
    pub name: String,
    #[serde(default)]
    pub iso3: Option<String>,
    #[serde(default)]
    pub num_code: Option<i64>,
    #[serde(default)]
    pub phone_code: Option<i64>,
}

pub struct CountryService {
    gateway: RequestGateway,
}

impl CountryService {
    pub fn new(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<Country>> {
        let body = self
            .gateway
            .fetch::<Value>(Method::GET, "/countries", None)
            .await?;
        decode_list(body)
    }

    pub async fn get_by_id(&self, country_id: i64) -> Result<Country> {
        let body = self
            .gateway
            .fetch::<Value>(Method::GET, &format!("/countries/{country_id}"), None)
            .await?;
        decode_entity(body)
    }
}

impl Clone for CountryService {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}
