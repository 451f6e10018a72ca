use anyhow::{anyhow, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::error;

pub mod models;
use models::CredentialDocument;

use crate::error::{BotError, BotResult};

/// Fixed document address of the Twitter credentials.
pub const CREDENTIALS_PATH: &str = "twitter/credentials";

/// Thread-safe SQLite connection (single connection with mutex)
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the SQLite database at the given path.
    /// `":memory:"` opens a private in-memory database.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Database {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Run schema migrations (idempotent)
    fn run_migrations(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database connection mutex poisoned"))
    }

    // ── Documents ─────────────────────────────────────────────────────────────

    /// Fetch the JSON document stored at `path`, if any
    pub fn get_document(&self, path: &str) -> Result<Option<serde_json::Value>> {
        let conn = self.lock()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT data FROM documents WHERE path = ?1",
                params![path],
                |row| row.get(0),
            )
            .optional()?;
        match raw {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Replace the document stored at `path` (no field merge)
    pub fn set_document(&self, path: &str, data: &serde_json::Value) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO documents (path, data, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(path) DO UPDATE SET
                data=excluded.data,
                updated_at=excluded.updated_at",
            params![path, data.to_string(), Utc::now()],
        )?;
        Ok(())
    }
}

/// Persistence for the single OAuth credential document.
pub trait CredentialStore: Send + Sync {
    /// Read the document; an absent document reads as empty.
    fn get(&self) -> BotResult<CredentialDocument>;

    /// Fully replace the document.
    fn set(&self, document: &CredentialDocument) -> BotResult<()>;
}

impl CredentialStore for Database {
    fn get(&self) -> BotResult<CredentialDocument> {
        let doc = self.get_document(CREDENTIALS_PATH).map_err(|e| {
            error!("Failed to read {}: {}", CREDENTIALS_PATH, e);
            BotError::StoreUnavailable(e.to_string())
        })?;
        match doc {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| BotError::StoreUnavailable(format!("corrupt credentials: {}", e))),
            None => Ok(CredentialDocument::default()),
        }
    }

    fn set(&self, document: &CredentialDocument) -> BotResult<()> {
        let value = serde_json::to_value(document)
            .map_err(|e| BotError::StoreUnavailable(e.to_string()))?;
        self.set_document(CREDENTIALS_PATH, &value).map_err(|e| {
            error!("Failed to write {}: {}", CREDENTIALS_PATH, e);
            BotError::StoreUnavailable(e.to_string())
        })
    }
}

/// SQLite schema (idempotent CREATE IF NOT EXISTS)
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS documents (
    path        TEXT    PRIMARY KEY,
    data        TEXT    NOT NULL,
    updated_at  TEXT    NOT NULL
);
"#;
