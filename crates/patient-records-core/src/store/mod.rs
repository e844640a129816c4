//! Persistence adapters for the patient collection.
//!
//! The whole collection is stored as one JSON array under a single key, the
//! way a browser key-value store would hold it.

mod memory;
mod schema;
mod sqlite;

pub use memory::*;
pub use schema::*;
pub use sqlite::*;

use thiserror::Error;

use crate::models::Patient;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "patients";

/// Persistence errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Malformed stored data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// True when the stored payload exists but cannot be decoded.
    pub fn is_malformed(&self) -> bool {
        matches!(self, StoreError::Json(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Load/save boundary for the record collection.
pub trait PatientStore {
    /// Read the stored collection; `None` means nothing has been stored yet.
    fn load(&self) -> StoreResult<Option<Vec<Patient>>>;

    /// Replace the stored collection.
    fn save(&self, records: &[Patient]) -> StoreResult<()>;
}

impl<S: PatientStore + ?Sized> PatientStore for Box<S> {
    fn load(&self) -> StoreResult<Option<Vec<Patient>>> {
        (**self).load()
    }

    fn save(&self, records: &[Patient]) -> StoreResult<()> {
        (**self).save(records)
    }
}

/// Decode a stored JSON array of flat patient objects.
pub fn decode_collection(payload: &str) -> StoreResult<Vec<Patient>> {
    Ok(serde_json::from_str(payload)?)
}

/// Encode the collection as a JSON array of flat patient objects.
pub fn encode_collection(records: &[Patient]) -> StoreResult<String> {
    Ok(serde_json::to_string(records)?)
}
