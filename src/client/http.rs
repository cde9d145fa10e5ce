//! HTTP implementation of [`EstateApi`] on top of reqwest.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

use super::error::{ClientError, ClientResult};
use super::EstateApi;
use crate::model::{Credentials, Property, PropertyDraft, PropertyId};

/// Backend address used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Connection options for [`EstateClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL of the backend, e.g. "http://localhost:8080"
    pub base_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl ClientOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}

/// REST client for the property backend
#[derive(Debug, Clone)]
pub struct EstateClient {
    client: Client,
    base_url: String,
}

impl EstateClient {
    pub fn new(options: ClientOptions) -> ClientResult<Self> {
        let base_url = options.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: options.base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Properties whose address matches exactly
    pub async fn search_properties(&self, address: &str) -> ClientResult<Vec<Property>> {
        tracing::debug!(address, "GET /properties?address");

        let response = self
            .client
            .get(self.url("/properties"))
            .query(&[("address", address)])
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Raw `/health` document
    pub async fn health(&self) -> ClientResult<serde_json::Value> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl EstateApi for EstateClient {
    async fn login(&self, credentials: &Credentials) -> ClientResult<()> {
        tracing::debug!(username = %credentials.username, "POST /auth/login");

        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(credentials)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        check_status(response).await?;
        Ok(())
    }

    async fn register(&self, credentials: &Credentials) -> ClientResult<()> {
        tracing::debug!(username = %credentials.username, "POST /auth/register");

        let response = self
            .client
            .post(self.url("/auth/register"))
            .json(credentials)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        check_status(response).await?;
        Ok(())
    }

    async fn list_properties(&self) -> ClientResult<Vec<Property>> {
        tracing::debug!("GET /properties");

        let response = self
            .client
            .get(self.url("/properties"))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn get_property(&self, id: PropertyId) -> ClientResult<Property> {
        tracing::debug!(id, "GET /properties/:id");

        let response = self
            .client
            .get(self.url(&format!("/properties/{}", id)))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn create_property(&self, draft: &PropertyDraft) -> ClientResult<Property> {
        tracing::debug!(address = %draft.address, "POST /properties");

        let response = self
            .client
            .post(self.url("/properties"))
            .json(draft)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn update_property(
        &self,
        id: PropertyId,
        draft: &PropertyDraft,
    ) -> ClientResult<Property> {
        tracing::debug!(id, "PUT /properties/:id");

        let response = self
            .client
            .put(self.url(&format!("/properties/{}", id)))
            .json(draft)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn delete_property(&self, id: PropertyId) -> ClientResult<()> {
        tracing::debug!(id, "DELETE /properties/:id");

        let response = self
            .client
            .delete(self.url(&format!("/properties/{}", id)))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        check_status(response).await?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Map a non-success status to its [`ClientError`]
async fn check_status(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&text)
        .map(|envelope| envelope.error.message)
        .unwrap_or(text);

    Err(match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::CONFLICT => ClientError::Conflict(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        _ => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    })
}
