//! Filesystem account store.
//!
//! Persists the account store as pretty-printed JSON. Writes go to a
//! temporary file in the same directory which is then renamed over the
//! target, so a crash never leaves a truncated store behind.
//!
//! Saves hold an exclusive lock on a sibling `<store>.lock` file from the
//! revision check until the rename, so two writers that loaded the same
//! revision cannot both pass the check.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;
use tracing::{debug, trace};

use super::{parse, serialize, Repository, Revision};
use crate::core::domain::AccountStore;
use crate::error::{Result, StoreError};

/// JSON file backed account store.
#[derive(Debug, Clone)]
pub struct FileRepository {
    path: PathBuf,
}

impl FileRepository {
    /// Create a repository for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }
            .into()),
        }
    }

    /// Sibling lock file guarding saves.
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Take the exclusive save lock. Released when the file is dropped.
    fn lock(&self) -> io::Result<File> {
        ensure_parent(&self.path)?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(self.lock_path())?;
        file.lock_exclusive()?;
        trace!(path = %self.lock_path().display(), "save lock acquired");
        Ok(file)
    }

    fn current_revision(&self) -> Result<Revision> {
        Ok(match self.read()? {
            Some(bytes) => Revision::of(&bytes),
            None => Revision::Absent,
        })
    }
}

impl Repository for FileRepository {
    fn load(&self) -> Result<AccountStore> {
        debug!(path = %self.path.display(), "loading account store");

        match self.read()? {
            Some(bytes) => parse(&self.path, &bytes),
            None => {
                debug!("no account store yet");
                let mut store = AccountStore::new();
                store.set_revision(Revision::Absent);
                Ok(store)
            }
        }
    }

    fn save(&self, store: &mut AccountStore) -> Result<()> {
        debug!(path = %self.path.display(), accounts = store.len(), "saving account store");

        let bytes = serialize(store)?;

        let _lock = self.lock().map_err(|source| StoreError::Write {
            path: self.lock_path(),
            source,
        })?;

        let current = self.current_revision()?;
        if !store.revision().permits(&current) {
            return Err(StoreError::Conflict(self.path.clone()).into());
        }

        replace_file(&self.path, &bytes).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        store.set_revision(Revision::of(&bytes));
        Ok(())
    }
}

/// Atomically replace `path` with `contents`, readable only by the owner.
pub(crate) fn replace_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = ensure_parent(path)?;

    // NamedTempFile is created with mode 0600 on Unix.
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    trace!(path = %path.display(), bytes = contents.len(), "file replaced");
    Ok(())
}

/// Create the parent directory of `path` and return it.
fn ensure_parent(path: &Path) -> io::Result<&Path> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    Ok(dir)
}
