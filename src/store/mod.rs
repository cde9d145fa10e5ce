//! Estate Store
//!
//! Persistence for the backend: registered users (bcrypt password hashes)
//! and properties, in a single SQLite database.

pub mod error;
pub mod password;
pub mod sqlite;

pub use error::{StoreError, StoreResult};
pub use sqlite::Store;

use std::path::PathBuf;

/// Default database file location
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("estate").join("estate.db"))
        .unwrap_or_else(|| PathBuf::from("./estate_data/estate.db"))
}
