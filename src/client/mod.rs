//! Estate REST Client
//!
//! Typed access to the backend endpoints:
//!
//! - `POST /auth/login`, `POST /auth/register`
//! - `GET /properties`, `GET /properties/:id`
//! - `POST /properties`, `PUT /properties/:id`, `DELETE /properties/:id`
//!
//! Success is decided by HTTP status alone. The [`EstateApi`] trait is the
//! seam the views are written against, so they can run against the real
//! [`EstateClient`] or an in-process fake.

pub mod error;
pub mod http;

pub use error::{ClientError, ClientResult};
pub use http::{ClientOptions, EstateClient, DEFAULT_BASE_URL};

use async_trait::async_trait;

use crate::model::{Credentials, Property, PropertyDraft, PropertyId};

/// Operations the views need from the backend
#[async_trait]
pub trait EstateApi: Send + Sync {
    /// Check credentials. `Ok(())` means the backend accepted them.
    async fn login(&self, credentials: &Credentials) -> ClientResult<()>;

    /// Create an account. `Ok(())` means the account now exists.
    async fn register(&self, credentials: &Credentials) -> ClientResult<()>;

    /// Fetch the full property collection
    async fn list_properties(&self) -> ClientResult<Vec<Property>>;

    async fn get_property(&self, id: PropertyId) -> ClientResult<Property>;

    async fn create_property(&self, draft: &PropertyDraft) -> ClientResult<Property>;

    async fn update_property(&self, id: PropertyId, draft: &PropertyDraft)
        -> ClientResult<Property>;

    async fn delete_property(&self, id: PropertyId) -> ClientResult<()>;
}
