//! HTTP API Client
//!
//! Functions for communicating with the Estate REST API. Success is
//! decided by the response status; bodies of auth responses are ignored.

use gloo_net::http::{Request, Response};
use serde::Serialize;
use std::fmt;

use crate::state::{Property, PropertyDraft};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item("estate_api_url").ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Why a request did not succeed
#[derive(Debug, Clone, PartialEq)]
pub enum ApiFailure {
    /// 401 from the backend
    Unauthorized,
    /// Any other non-success status
    Status(u16),
    /// The request never got a response
    Network(String),
    /// The response body was not what we expected
    Parse(String),
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::Unauthorized => write!(f, "Unauthorized"),
            ApiFailure::Status(status) => write!(f, "Request failed with status {}", status),
            ApiFailure::Network(e) => write!(f, "Network error: {}", e),
            ApiFailure::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    username: &'a str,
    password: &'a str,
}

async fn send(request: Request) -> Result<Response, ApiFailure> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiFailure::Network(e.to_string()))?;

    match response.status() {
        401 => Err(ApiFailure::Unauthorized),
        _ if response.ok() => Ok(response),
        status => Err(ApiFailure::Status(status)),
    }
}

fn json_request<T: Serialize>(
    request: gloo_net::http::RequestBuilder,
    body: &T,
) -> Result<Request, ApiFailure> {
    request.json(body).map_err(|e| ApiFailure::Parse(e.to_string()))
}

// ============ API Functions ============

/// Check credentials
pub async fn login(username: &str, password: &str) -> Result<(), ApiFailure> {
    let url = format!("{}/auth/login", get_api_base());
    let request = json_request(
        Request::post(&url),
        &CredentialsBody { username, password },
    )?;

    send(request).await.map(|_| ())
}

/// Create an account
pub async fn register(username: &str, password: &str) -> Result<(), ApiFailure> {
    let url = format!("{}/auth/register", get_api_base());
    let request = json_request(
        Request::post(&url),
        &CredentialsBody { username, password },
    )?;

    send(request).await.map(|_| ())
}

/// Fetch all properties
pub async fn fetch_properties() -> Result<Vec<Property>, ApiFailure> {
    let url = format!("{}/properties", get_api_base());
    let request = Request::get(&url)
        .build()
        .map_err(|e| ApiFailure::Network(e.to_string()))?;
    let response = send(request).await?;

    response
        .json()
        .await
        .map_err(|e| ApiFailure::Parse(e.to_string()))
}

/// Create a property
pub async fn create_property(draft: &PropertyDraft) -> Result<Property, ApiFailure> {
    let url = format!("{}/properties", get_api_base());
    let response = send(json_request(Request::post(&url), draft)?).await?;

    response
        .json()
        .await
        .map_err(|e| ApiFailure::Parse(e.to_string()))
}

/// Replace a property's fields
pub async fn update_property(id: i64, draft: &PropertyDraft) -> Result<Property, ApiFailure> {
    let url = format!("{}/properties/{}", get_api_base(), id);
    let response = send(json_request(Request::put(&url), draft)?).await?;

    response
        .json()
        .await
        .map_err(|e| ApiFailure::Parse(e.to_string()))
}

/// Delete a property
pub async fn delete_property(id: i64) -> Result<(), ApiFailure> {
    let url = format!("{}/properties/{}", get_api_base(), id);
    let request = Request::delete(&url)
        .build()
        .map_err(|e| ApiFailure::Network(e.to_string()))?;

    send(request).await.map(|_| ())
}
