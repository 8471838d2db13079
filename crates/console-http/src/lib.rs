//! Admin Console Request Gateway
//!
//! Every call to the admin API goes through one `RequestGateway::execute`:
//! - bodies of POST/PUT/PATCH are sent as JSON
//! - `Content-Type` and `Authorization` headers are patched in
//! - a 401 from any endpoint ends the session before the error is returned

mod error;
mod gateway;
mod headers;
mod request;
mod response;

pub use error::GatewayError;
pub use gateway::RequestGateway;
pub use headers::{patch_headers, Headers};
pub use request::{RequestBody, RequestOptions, ResponseKind};
pub use response::{ApiResponse, ResponseBody};

pub use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
pub use reqwest::{Method, StatusCode};

pub type Result<T> = std::result::Result<T, GatewayError>;
