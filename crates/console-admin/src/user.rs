//! Users resource

use console_http::{Method, RequestBody, RequestGateway, RequestOptions, ResponseKind};
use serde::{Deserialize, Serialize};

use crate::entity::{decode_entity, decode_list};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Absent until the server has stored the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub country_id: Option<i64>,
}

impl User {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: None,
            first_name: String::new(),
            last_name: String::new(),
            username: username.into(),
            email: email.into(),
            birth: None,
            gender: None,
            country_id: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.user_id.is_none()
    }

    /// Full name, falling back to the username
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

pub struct UsersService {
    gateway: RequestGateway,
}

impl UsersService {
    pub fn new(gateway: RequestGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let body = self
            .gateway
            .fetch::<serde_json::Value>(Method::GET, "/users", None)
            .await?;
        let users = decode_list(body)?;
        tracing::debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    pub async fn get_by_id(&self, user_id: i64) -> Result<User> {
        let body = self
            .gateway
            .fetch(Method::GET, &format!("/users/{user_id}"), None)
            .await?;
        decode_entity(body)
    }

    /// Create a new user or update an existing one
    pub async fn save(&self, user: &User) -> Result<User> {
        let (method, path) = match user.user_id {
            None => (Method::POST, "/users".to_string()),
            Some(id) => (Method::PUT, format!("/users/{id}")),
        };

        let body = self
            .gateway
            .fetch(method, &path, Some(RequestBody::json(user)?))
            .await?;
        let saved: User = decode_entity(body)?;

        tracing::info!(user_id = ?saved.user_id, username = %saved.username, "Saved user");

        Ok(saved)
    }

    pub async fn delete(&self, user_id: i64) -> Result<()> {
        self.gateway
            .execute(
                Method::DELETE,
                &format!("/users/{user_id}"),
                None,
                RequestOptions::new().expecting(ResponseKind::Bytes),
            )
            .await?;

        tracing::info!(user_id, "Deleted user");

        Ok(())
    }
}

impl Clone for UsersService {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
        }
    }
}
