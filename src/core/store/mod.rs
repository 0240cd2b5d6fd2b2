//! Account store persistence.
//!
//! The vault talks to a [`Repository`] so the backing medium can change
//! without touching account logic.
//!
//! ## Backends
//!
//! - [`FileRepository`]: JSON file, replaced atomically on save.
//! - [`MemoryRepository`]: in-memory bytes, for tests and embedding.
//!
//! ## Concurrent writers
//!
//! There is no lock. Each load records a [`Revision`] (a digest of the bytes
//! read) and each save refuses to replace data whose revision has changed
//! since, returning `StoreError::Conflict`.

use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::core::domain::AccountStore;
use crate::error::{Result, StoreError};

mod fs;
mod memory;

pub(crate) use fs::replace_file;
pub use fs::FileRepository;
pub use memory::MemoryRepository;

/// Persistent storage for the account store.
pub trait Repository {
    /// Load the account store.
    ///
    /// Missing data yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Read` if the data cannot be read and
    /// `StoreError::Malformed` if it cannot be parsed.
    fn load(&self) -> Result<AccountStore>;

    /// Replace the persisted store with `store`.
    ///
    /// On success the store's revision is updated so it can be saved again.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the persisted data changed since
    /// `store` was loaded, or `StoreError::Write` if writing fails.
    fn save(&self, store: &mut AccountStore) -> Result<()>;
}

/// Version of persisted data a store was loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Revision {
    /// Not loaded from a repository; saves are unconditional
    #[default]
    Untracked,
    /// Nothing was persisted yet
    Absent,
    /// SHA-256 of the persisted bytes
    Digest([u8; 32]),
}

impl Revision {
    /// Revision of a persisted byte string.
    pub fn of(bytes: &[u8]) -> Self {
        Revision::Digest(Sha256::digest(bytes).into())
    }

    /// Whether a store loaded at `self` may overwrite data at `current`.
    pub fn permits(&self, current: &Revision) -> bool {
        matches!(self, Revision::Untracked) || self == current
    }
}

/// Parse persisted bytes into a store stamped with their revision.
fn parse(source: &Path, bytes: &[u8]) -> Result<AccountStore> {
    let mut store: AccountStore =
        serde_json::from_slice(bytes).map_err(|e| StoreError::Malformed {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    store.set_revision(Revision::of(bytes));

    debug!(accounts = store.len(), "account store loaded");
    Ok(store)
}

/// Serialize a store the way every backend persists it.
fn serialize(store: &AccountStore) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(store)?;
    bytes.push(b'\n');
    Ok(bytes)
}
