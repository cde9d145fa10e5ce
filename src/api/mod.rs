//! Estate REST API
//!
//! HTTP backend for the property client, built with Axum.
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST /auth/register` - Create an account (201, 409 if taken)
//! - `POST /auth/login` - Check credentials (200, 401 if rejected)
//!
//! ## Properties
//! - `GET /properties` - List all properties
//! - `POST /properties` - Create a property
//! - `GET /properties/:id` - Get a property
//! - `PUT /properties/:id` - Update a property
//! - `DELETE /properties/:id` - Delete a property
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use estate::api::{serve, ApiConfig, AppState};
//! use estate::store::Store;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(Store::open("estate.db")?);
//!     let config = ApiConfig::default();
//!
//!     serve(AppState::new(store, config.clone()), &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use extract::ApiJson;
pub use state::{ApiConfig, AppState};

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/auth", auth_routes)
        .route(
            "/properties",
            get(routes::properties::list_properties).post(routes::properties::create_property),
        )
        .route(
            "/properties/:id",
            get(routes::properties::get_property)
                .put(routes::properties::update_property)
                .delete(routes::properties::delete_property),
        )
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the browser front-end. An empty list allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Estate API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Estate API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::HealthResponse;
    use crate::model::Property;
    use crate::store::Store;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let store = Arc::new(Store::in_memory().unwrap());
        build_router(AppState::new(store, ApiConfig::default()))
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();

        let response = app.oneshot(get_request("/health/live")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let app = create_test_app();

        let response = app.oneshot(get_request("/health/ready")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app();

        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let health: HealthResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.properties, Some(0));
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let app = create_test_app();
        let creds = r#"{"username": "alice", "password": "password123"}"#;

        let response = app
            .clone()
            .oneshot(json_request("POST", "/auth/register", creds))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_bytes(response).await, dto::REGISTERED_MESSAGE.as_bytes());

        let response = app
            .clone()
            .oneshot(json_request("POST", "/auth/register", creds))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .clone()
            .oneshot(json_request("POST", "/auth/login", creds))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(json_request(
                "POST",
                "/auth/login",
                r#"{"username": "alice", "password": "wrong"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_unknown_user() {
        let app = create_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/auth/login",
                r#"{"username": "ghost", "password": "password123"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_list_properties_empty() {
        let app = create_test_app();

        let response = app.oneshot(get_request("/properties")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let list: Vec<Property> = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(list.is_empty());
    }

    #[tokio::test]
    async fn test_property_lifecycle() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/properties",
                r#"{"address": "Address", "price": 150000.0, "size": 150.0, "description": "Description"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Property = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(created.price, 150000.0);

        let uri = format!("/properties/{}", created.id);

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &uri,
                r#"{"address": "New Address", "price": 200000.0, "size": 200.0, "description": "New Description"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.clone().oneshot(get_request(&uri)).await.unwrap();
        let fetched: Property = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.address, "New Address");

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(&uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.oneshot(get_request(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_missing_property() {
        let app = create_test_app();

        let response = app
            .oneshot(json_request(
                "PUT",
                "/properties/99",
                r#"{"address": "A", "price": 1.0, "size": 1.0, "description": "d"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_invalid_json() {
        let app = create_test_app();

        let response = app
            .oneshot(json_request("POST", "/properties", "not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_missing_fields_uses_error_envelope() {
        let app = create_test_app();

        let response = app
            .oneshot(json_request("POST", "/properties", r#"{"address": "a"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("price"));
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_create_negative_price() {
        let app = create_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/properties",
                r#"{"address": "A", "price": -5.0, "size": 1.0, "description": "d"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_filter_by_address() {
        let app = create_test_app();

        for address in ["Main St", "Side St"] {
            let body = format!(
                r#"{{"address": "{}", "price": 1.0, "size": 1.0, "description": "d"}}"#,
                address
            );
            app.clone()
                .oneshot(json_request("POST", "/properties", &body))
                .await
                .unwrap();
        }

        let response = app
            .oneshot(get_request("/properties?address=Side%20St"))
            .await
            .unwrap();
        let list: Vec<Property> = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].address, "Side St");
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_ui_origin() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/properties")
                    .header("Origin", "http://localhost:3000")
                    .header("Access-Control-Request-Method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:3000"
        );
    }
}
