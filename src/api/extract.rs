//! Request extractors whose rejections use the [`ApiError`] envelope.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use super::error::ApiError;

/// JSON body extractor. Unlike [`Json`], a body that fails to parse or
/// deserialize comes back as a 400 `VALIDATION_ERROR`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PropertyDraft;
    use axum::{body::Body, http::StatusCode, response::IntoResponse};

    fn request(content_type: &str, body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("Content-Type", content_type)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let req = request(
            "application/json",
            r#"{"address": "A", "price": 1.0, "size": 2.0, "description": "d"}"#,
        );

        let ApiJson(draft) = ApiJson::<PropertyDraft>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(draft, PropertyDraft::new("A", 1.0, 2.0, "d"));
    }

    #[tokio::test]
    async fn test_missing_field_is_validation_error() {
        let req = request("application/json", r#"{"address": "a"}"#);

        let err = ApiJson::<PropertyDraft>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref message) if message.contains("price")));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_wrong_content_type_is_validation_error() {
        let req = request("text/plain", "{}");

        let err = ApiJson::<PropertyDraft>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
