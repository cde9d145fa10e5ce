//! Property Routes
//!
//! CRUD endpoints for properties.
//!
//! - GET /properties - List all properties (optional `?address=` exact match)
//! - POST /properties - Create a property
//! - GET /properties/:id - Get a property
//! - PUT /properties/:id - Replace a property's fields
//! - DELETE /properties/:id - Delete a property

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::ListPropertiesParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::ApiJson;
use crate::api::state::AppState;
use crate::model::{Property, PropertyDraft, PropertyId};

/// GET /properties
pub async fn list_properties(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListPropertiesParams>,
) -> ApiResult<Json<Vec<Property>>> {
    let properties = match params.address.as_deref() {
        Some(address) => state.store.find_by_address(address)?,
        None => state.store.list_properties()?,
    };

    Ok(Json(properties))
}

/// GET /properties/:id
pub async fn get_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<PropertyId>,
) -> ApiResult<Json<Property>> {
    let property = state
        .store
        .get_property(id)?
        .ok_or_else(|| ApiError::NotFound(format!("Property with id {} not found", id)))?;

    Ok(Json(property))
}

/// POST /properties
pub async fn create_property(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<PropertyDraft>,
) -> ApiResult<(StatusCode, Json<Property>)> {
    let draft = validate_draft(req)?;

    let property = state.store.create_property(&draft)?;

    tracing::info!(property_id = property.id, address = %property.address, "Created property");

    Ok((StatusCode::CREATED, Json(property)))
}

/// PUT /properties/:id
pub async fn update_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<PropertyId>,
    ApiJson(req): ApiJson<PropertyDraft>,
) -> ApiResult<Json<Property>> {
    let draft = validate_draft(req)?;

    let property = state.store.update_property(id, &draft)?;

    tracing::info!(property_id = id, "Updated property");

    Ok(Json(property))
}

/// DELETE /properties/:id
pub async fn delete_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<PropertyId>,
) -> ApiResult<StatusCode> {
    state.store.delete_property(id)?;

    tracing::info!(property_id = id, "Deleted property");

    Ok(StatusCode::NO_CONTENT)
}

/// Validate a create/update body
fn validate_draft(req: PropertyDraft) -> ApiResult<PropertyDraft> {
    let address = req.address.trim();

    if address.is_empty() {
        return Err(ApiError::Validation("Address cannot be empty".to_string()));
    }

    if address.len() > 500 {
        return Err(ApiError::Validation(
            "Address exceeds maximum length of 500 characters".to_string(),
        ));
    }

    if !req.price.is_finite() || req.price < 0.0 {
        return Err(ApiError::Validation(
            "Price must be a finite, non-negative number".to_string(),
        ));
    }

    if !req.size.is_finite() || req.size < 0.0 {
        return Err(ApiError::Validation(
            "Size must be a finite, non-negative number".to_string(),
        ));
    }

    Ok(PropertyDraft::new(
        address,
        req.price,
        req.size,
        req.description.trim(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_draft() {
        let draft = validate_draft(PropertyDraft::new(" Calle 1 ", 10.0, 20.0, " d ")).unwrap();
        assert_eq!(draft, PropertyDraft::new("Calle 1", 10.0, 20.0, "d"));
    }

    #[test]
    fn test_validate_draft_rejects() {
        assert!(validate_draft(PropertyDraft::new("", 1.0, 1.0, "")).is_err());
        assert!(validate_draft(PropertyDraft::new("a", -1.0, 1.0, "")).is_err());
        assert!(validate_draft(PropertyDraft::new("a", 1.0, f64::INFINITY, "")).is_err());
    }
}
