//! In-memory key-value store.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{
    decode_collection, encode_collection, PatientStore, StoreError, StoreResult,
    DEFAULT_STORAGE_KEY,
};
use crate::models::Patient;

/// Key-value map holding raw JSON payloads.
///
/// Used by tests and ephemeral hosts. Writes can be disabled to exercise
/// failure paths.
#[derive(Debug)]
pub struct MemoryStore {
    key: String,
    entries: RefCell<HashMap<String, String>>,
    read_only: Cell<bool>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_key(DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: RefCell::new(HashMap::new()),
            read_only: Cell::new(false),
        }
    }

    /// Seed the store with a raw payload (which need not be valid JSON).
    pub fn with_raw(self, payload: impl Into<String>) -> Self {
        self.entries
            .borrow_mut()
            .insert(self.key.clone(), payload.into());
        self
    }

    /// The raw stored payload, if any.
    pub fn raw(&self) -> Option<String> {
        self.entries.borrow().get(&self.key).cloned()
    }

    /// Make subsequent saves fail with [`StoreError::Unavailable`].
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }
}

impl PatientStore for MemoryStore {
    fn load(&self) -> StoreResult<Option<Vec<Patient>>> {
        self.raw().as_deref().map(decode_collection).transpose()
    }

    fn save(&self, records: &[Patient]) -> StoreResult<()> {
        if self.read_only.get() {
            return Err(StoreError::Unavailable(format!(
                "key '{}' is read-only",
                self.key
            )));
        }
        let payload = encode_collection(records)?;
        self.entries.borrow_mut().insert(self.key.clone(), payload);
        Ok(())
    }
}
