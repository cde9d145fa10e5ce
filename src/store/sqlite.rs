//! SQLite-backed store for users and properties.
//!
//! One connection behind a mutex; every operation is a short statement so
//! handlers call straight into it.

use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::model::{Credentials, Property, PropertyDraft, PropertyId};
use crate::store::error::{StoreError, StoreResult};
use crate::store::password::{hash_password, verify_password};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT    NOT NULL UNIQUE,
    password_hash TEXT    NOT NULL,
    created_at    TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS properties (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    address     TEXT NOT NULL,
    price       REAL NOT NULL,
    size        REAL NOT NULL,
    description TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_properties_address ON properties(address);
";

const PROPERTY_COLUMNS: &str = "id, address, price, size, description";

pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open (or create) a database file
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        tracing::info!(path = ?path, "Opened database");
        Self::init(conn)
    }

    /// Throwaway database, used by tests
    pub fn in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))
    }

    /// Check the database answers
    pub fn ping(&self) -> bool {
        self.conn()
            .and_then(|conn| Ok(conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?))
            .is_ok()
    }

    // ============================================
    // Users
    // ============================================

    /// Store a new user with a bcrypt hash. Fails with
    /// [`StoreError::UserExists`] when the username is taken.
    pub fn register_user(&self, credentials: &Credentials) -> StoreResult<i64> {
        let conn = self.conn()?;

        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM users WHERE username = ?1",
                params![credentials.username],
                |row| row.get(0),
            )
            .optional()?;
        if existing.is_some() {
            return Err(StoreError::UserExists(credentials.username.clone()));
        }

        let password_hash = hash_password(&credentials.password)?;
        conn.execute(
            "INSERT INTO users (username, password_hash, created_at) VALUES (?1, ?2, ?3)",
            params![
                credentials.username,
                password_hash,
                chrono::Utc::now().to_rfc3339(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Whether the username exists and the password matches
    pub fn authenticate(&self, credentials: &Credentials) -> StoreResult<bool> {
        let conn = self.conn()?;

        let stored: Option<String> = conn
            .query_row(
                "SELECT password_hash FROM users WHERE username = ?1",
                params![credentials.username],
                |row| row.get(0),
            )
            .optional()?;

        Ok(stored
            .map(|hash| verify_password(&credentials.password, &hash))
            .unwrap_or(false))
    }

    // ============================================
    // Properties
    // ============================================

    /// All properties, ascending id
    pub fn list_properties(&self) -> StoreResult<Vec<Property>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM properties ORDER BY id",
            PROPERTY_COLUMNS
        ))?;
        let rows = stmt.query_map([], property_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Properties whose address matches exactly
    pub fn find_by_address(&self, address: &str) -> StoreResult<Vec<Property>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM properties WHERE address = ?1 ORDER BY id",
            PROPERTY_COLUMNS
        ))?;
        let rows = stmt.query_map(params![address], property_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn get_property(&self, id: PropertyId) -> StoreResult<Option<Property>> {
        let conn = self.conn()?;
        Ok(conn
            .query_row(
                &format!("SELECT {} FROM properties WHERE id = ?1", PROPERTY_COLUMNS),
                params![id],
                property_from_row,
            )
            .optional()?)
    }

    pub fn create_property(&self, draft: &PropertyDraft) -> StoreResult<Property> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO properties (address, price, size, description) VALUES (?1, ?2, ?3, ?4)",
            params![draft.address, draft.price, draft.size, draft.description],
        )?;
        Ok(draft.clone().with_id(conn.last_insert_rowid()))
    }

    /// Replace all editable fields of an existing property
    pub fn update_property(&self, id: PropertyId, draft: &PropertyDraft) -> StoreResult<Property> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE properties SET address = ?1, price = ?2, size = ?3, description = ?4 WHERE id = ?5",
            params![draft.address, draft.price, draft.size, draft.description, id],
        )?;
        if changed == 0 {
            return Err(StoreError::PropertyNotFound(id));
        }
        Ok(draft.clone().with_id(id))
    }

    pub fn delete_property(&self, id: PropertyId) -> StoreResult<()> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM properties WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::PropertyNotFound(id));
        }
        Ok(())
    }

    pub fn property_count(&self) -> StoreResult<usize> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM properties", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn property_from_row(row: &Row<'_>) -> rusqlite::Result<Property> {
    Ok(Property {
        id: row.get(0)?,
        address: row.get(1)?,
        price: row.get(2)?,
        size: row.get(3)?,
        description: row.get(4)?,
    })
}
