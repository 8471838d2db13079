//! Request Gateway
//!
//! Single entry point for authenticated calls to the admin API.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use console_auth::SessionStore;

use crate::error::GatewayError;
use crate::headers::patch_headers;
use crate::request::{carries_body, RequestBody, RequestOptions};
use crate::response::ApiResponse;
use crate::Result;

pub struct RequestGateway {
    client: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl RequestGateway {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Run one request against `<base><path>`
    ///
    /// The body is only sent for POST, PUT and PATCH. A 401 ends the session
    /// and then surfaces as [`GatewayError::Unauthorized`]; every other
    /// failure is returned as-is. Nothing is retried.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<ApiResponse> {
        let headers = patch_headers(options.headers, self.session.token().as_deref())?;

        let url = Url::parse(&self.url_for(path))
            .map_err(|e| GatewayError::Configuration(format!("invalid request url: {e}")))?;

        let body = match body {
            Some(body) if carries_body(&method) => Some(body.into_string()?),
            _ => None,
        };

        tracing::debug!(method = %method, url = %url, "Dispatching request");

        let mut request = self.client.request(method.clone(), url).headers(headers);
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(method = %method, path = %path, "Request unauthorized, ending session");
            self.session.force_logout();
            return Err(GatewayError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(method = %method, path = %path, status = %status, "Request failed");
            return Err(GatewayError::Status { status, body });
        }

        ApiResponse::read(response, options.response).await
    }

    /// `execute` with default options, decoding the JSON body into `T`
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> Result<T> {
        self.execute(method, path, body, RequestOptions::default())
            .await?
            .json()
    }
}

impl Clone for RequestGateway {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            session: self.session.clone(),
        }
    }
}
