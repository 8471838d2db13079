//! Credential exchange
//!
//! Trades a username and password for a session token.

use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::status::SessionStatus;
use crate::store::SessionStore;
use crate::Result;

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

pub struct CredentialExchange {
    client: reqwest::Client,
    authenticate_url: String,
    session: SessionStore,
}

impl CredentialExchange {
    pub fn new(
        client: reqwest::Client,
        authenticate_url: impl Into<String>,
        session: SessionStore,
    ) -> Self {
        Self {
            client,
            authenticate_url: authenticate_url.into(),
            session,
        }
    }

    pub fn authenticate_url(&self) -> &str {
        &self.authenticate_url
    }

    /// Attempt a login; there is no retry
    ///
    /// Resolves with LOGGED_IN once the token is persisted and the status
    /// has settled. Any rejection, transport failure or token-less response
    /// leaves the session in INVALID_CREDENTIALS.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionStatus> {
        self.session.transition(SessionStatus::LoginAttempt);

        let token = match self.request_token(username, password).await {
            Ok(token) => token,
            Err(reason) => {
                tracing::warn!(username = %username, reason = %reason, "Login rejected");
                self.session.transition(SessionStatus::InvalidCredentials);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if let Err(e) = self.session.persist_token(&token) {
            tracing::error!(error = %e, "Failed to persist session token");
            self.session.transition(SessionStatus::InvalidCredentials);
            return Err(e.into());
        }

        // Pause before announcing LOGGED_IN
        tokio::time::sleep(self.session.settings().settle_delay).await;
        self.session.transition(SessionStatus::LoggedIn);

        tracing::info!(username = %username, "Logged in");

        Ok(SessionStatus::LoggedIn)
    }

    async fn request_token(
        &self,
        username: &str,
        password: &str,
    ) -> std::result::Result<String, String> {
        let response = self
            .client
            .post(&self.authenticate_url)
            .header(CONTENT_TYPE, "application/json")
            .json(&Credentials { username, password })
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}"));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| format!("invalid token response: {e}"))?;

        if body.token.is_empty() {
            return Err("empty token".to_string());
        }

        Ok(body.token)
    }
}

impl Clone for CredentialExchange {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            authenticate_url: self.authenticate_url.clone(),
            session: self.session.clone(),
        }
    }
}
