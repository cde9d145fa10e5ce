//! # Estate
//!
//! Property management - a small REST backend plus the client side that
//! drives it: log in, register, and list, create, edit and delete
//! properties.
//!
//! ## Modules
//!
//! - [`model`]: Credentials and property types shared by every layer
//! - [`client`]: Typed HTTP client for the REST endpoints
//! - [`session`]: The "authenticated" flag store
//! - [`views`]: Login, register and property list/form state machines
//! - [`store`]: SQLite persistence for users and properties
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: Global `tracing` subscriber setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use estate::client::{ClientOptions, EstateClient};
//! use estate::session::MemorySession;
//! use estate::views::{LoginView, PropertiesView, Route};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = EstateClient::new(ClientOptions::default())?;
//!     let session = MemorySession::new();
//!
//!     let mut login = LoginView::with_credentials("alice", "password123");
//!     if login.submit(&api, &session).await == Some(Route::Properties) {
//!         let mut properties = PropertiesView::new();
//!         properties.mount(&api, &session).await;
//!
//!         for property in properties.properties() {
//!             println!("{}", property);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod logging;
pub mod model;
pub mod session;
pub mod store;
pub mod views;

// Re-export top-level types for convenience
pub use model::{Credentials, Property, PropertyDraft, PropertyId};

pub use client::{ClientError, ClientOptions, ClientResult, EstateApi, EstateClient};

pub use session::{FileSession, MemorySession, SessionError, SessionStore, SESSION_KEY};

pub use views::{
    FormError, FormField, LoginFailure, LoginView, PropertiesView, PropertyForm,
    RegisterFailure, RegisterView, Route, SubmitOutcome,
};

pub use store::{Store, StoreError, StoreResult};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{ClientConfig, Config, ConfigError, LoggingConfig, ServerConfig};

pub use logging::{init_logging, LogFormat, LoggingError};
