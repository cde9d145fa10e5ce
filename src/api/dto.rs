//! Data Transfer Objects
//!
//! Request and response types for the API endpoints that are not plain
//! domain types. Credentials and property drafts travel as
//! [`Credentials`](crate::model::Credentials) and
//! [`PropertyDraft`](crate::model::PropertyDraft).

use serde::{Deserialize, Serialize};

/// Body of a successful registration
pub const REGISTERED_MESSAGE: &str = "User registered successfully";

/// Body of a successful login
pub const LOGIN_MESSAGE: &str = "Login successful";

/// Query parameters of `GET /properties`
#[derive(Debug, Default, Deserialize)]
pub struct ListPropertiesParams {
    /// Exact address match
    #[serde(default)]
    pub address: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// "ok" or "error"
    pub database: String,
    /// Stored property count, when the database answers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<usize>,
    pub uptime_seconds: u64,
    pub version: String,
}
