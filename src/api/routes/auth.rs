//! Auth Routes
//!
//! - POST /auth/register - Create an account
//! - POST /auth/login - Check credentials
//!
//! No token is issued; a 200 from login is the whole contract.

use axum::{extract::State, http::StatusCode};
use std::sync::Arc;

use crate::api::dto::{LOGIN_MESSAGE, REGISTERED_MESSAGE};
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::ApiJson;
use crate::api::state::AppState;
use crate::model::Credentials;

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<Credentials>,
) -> ApiResult<(StatusCode, &'static str)> {
    let credentials = validate_credentials(req)?;

    state.store.register_user(&credentials)?;

    tracing::info!(username = %credentials.username, "Registered user");

    Ok((StatusCode::CREATED, REGISTERED_MESSAGE))
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<Credentials>,
) -> ApiResult<(StatusCode, &'static str)> {
    let credentials = Credentials::new(req.username.trim(), req.password);

    if state.store.authenticate(&credentials)? {
        tracing::info!(username = %credentials.username, "Login succeeded");
        Ok((StatusCode::OK, LOGIN_MESSAGE))
    } else {
        tracing::info!(username = %credentials.username, "Login rejected");
        Err(ApiError::Unauthorized("Invalid credentials".to_string()))
    }
}

fn validate_credentials(req: Credentials) -> ApiResult<Credentials> {
    let username = req.username.trim();

    if username.is_empty() {
        return Err(ApiError::Validation("Username cannot be empty".to_string()));
    }

    if username.len() > 100 {
        return Err(ApiError::Validation(
            "Username exceeds maximum length of 100 characters".to_string(),
        ));
    }

    if req.password.is_empty() {
        return Err(ApiError::Validation("Password cannot be empty".to_string()));
    }

    Ok(Credentials::new(username, req.password))
}
