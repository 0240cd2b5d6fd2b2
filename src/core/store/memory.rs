//! In-memory account store.
//!
//! Holds the serialized bytes rather than the structure itself, so loads and
//! saves go through the same JSON encoding and revision checks as the file
//! backend.

use std::path::Path;
use std::sync::Mutex;

use super::{parse, serialize, Repository, Revision};
use crate::core::domain::AccountStore;
use crate::error::{Result, StoreError};

const SOURCE: &str = "<memory>";

/// Account store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    bytes: Mutex<Option<Vec<u8>>>,
}

impl MemoryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with raw persisted bytes.
    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Mutex::new(Some(bytes.into())),
        }
    }

    /// Raw persisted bytes, if anything was saved.
    pub fn contents(&self) -> Option<Vec<u8>> {
        self.bytes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Repository for MemoryRepository {
    fn load(&self) -> Result<AccountStore> {
        let guard = self.bytes.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_deref() {
            Some(bytes) => parse(Path::new(SOURCE), bytes),
            None => {
                let mut store = AccountStore::new();
                store.set_revision(Revision::Absent);
                Ok(store)
            }
        }
    }

    fn save(&self, store: &mut AccountStore) -> Result<()> {
        let bytes = serialize(store)?;

        let mut guard = self.bytes.lock().unwrap_or_else(|e| e.into_inner());
        let current = match guard.as_deref() {
            Some(existing) => Revision::of(existing),
            None => Revision::Absent,
        };
        if !store.revision().permits(&current) {
            return Err(StoreError::Conflict(SOURCE.into()).into());
        }

        store.set_revision(Revision::of(&bytes));
        *guard = Some(bytes);
        Ok(())
    }
}
