//! SQLite-backed key-value store.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use super::{
    decode_collection, encode_collection, PatientStore, StoreResult, DEFAULT_STORAGE_KEY, SCHEMA,
};
use crate::models::Patient;

/// Stores the collection as a JSON payload in a `kv_store` row.
pub struct SqliteStore {
    conn: Connection,
    key: String,
}

impl SqliteStore {
    /// Open store at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Create in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            key: DEFAULT_STORAGE_KEY.to_string(),
        })
    }

    /// Use a different storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Raw payload stored under the key.
    pub fn get_raw(&self) -> StoreResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?",
                [&self.key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Overwrite the raw payload stored under the key.
    pub fn put_raw(&self, payload: &str) -> StoreResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![self.key, payload],
        )?;
        Ok(())
    }

    /// Remove the stored payload. Returns whether anything was deleted.
    pub fn remove(&self) -> StoreResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?", [&self.key])?;
        Ok(rows_affected > 0)
    }
}

impl PatientStore for SqliteStore {
    fn load(&self) -> StoreResult<Option<Vec<Patient>>> {
        let payload = self.get_raw()?;
        tracing::debug!(key = %self.key, present = payload.is_some(), "loaded patient payload");
        payload.as_deref().map(decode_collection).transpose()
    }

    fn save(&self, records: &[Patient]) -> StoreResult<()> {
        let payload = encode_collection(records)?;
        self.put_raw(&payload)?;
        tracing::debug!(key = %self.key, count = records.len(), "saved patient collection");
        Ok(())
    }
}
