//! The primary interface for hutch operations.
//!
//! Every operation loads the account store fresh from the repository, works
//! on it in memory, and saves it back before returning. Nothing is cached
//! between calls.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::cipher::{AesCtr, Cipher};
use crate::core::config::Config;
use crate::core::domain::{list_accounts, AccountRecord, AccountStore, PlatformListing};
use crate::core::env::write_env_file;
use crate::core::export::{export_active, Export};
use crate::core::select;
use crate::core::store::{FileRepository, Repository};
use crate::core::validation::parse_platform;
use crate::error::Result;

/// Account vault: a repository, a cipher, and the env file to export to.
pub struct Vault {
    repo: Box<dyn Repository>,
    cipher: Box<dyn Cipher>,
    env_path: PathBuf,
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("cipher", &self.cipher.name())
            .field("env_path", &self.env_path)
            .finish_non_exhaustive()
    }
}

impl Vault {
    /// Open the vault described by `.hutch.toml` and the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid or no secret
    /// key is configured.
    pub fn open() -> Result<Self> {
        Self::from_config(&Config::load()?)
    }

    /// Open a file-backed vault from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no valid secret key is configured.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cipher = config.cipher()?;
        Ok(Self::new(
            FileRepository::new(&config.paths.accounts),
            cipher,
            &config.paths.env,
        ))
    }

    /// Assemble a vault from its parts.
    pub fn new(
        repo: impl Repository + 'static,
        cipher: impl Cipher + 'static,
        env_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            repo: Box::new(repo),
            cipher: Box::new(cipher),
            env_path: env_path.into(),
        }
    }

    /// Env file the active credentials are exported to.
    pub fn env_path(&self) -> &Path {
        &self.env_path
    }

    /// Load the account store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read or is malformed.
    pub fn load_accounts(&self) -> Result<AccountStore> {
        self.repo.load()
    }

    /// Save the account store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the store changed since it was
    /// loaded, or `StoreError::Write`.
    pub fn save_accounts(&self, store: &mut AccountStore) -> Result<()> {
        self.repo.save(store)
    }

    /// Encrypt and store a new, inactive account.
    ///
    /// Returns the account's 0-based index within its platform.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for an unknown platform, empty username or
    /// password, or an optional field the platform does not define.
    pub fn add_account(
        &self,
        platform: &str,
        username: &str,
        password: &str,
        extra: BTreeMap<String, String>,
    ) -> Result<usize> {
        let platform = parse_platform(platform)?;
        let record = AccountRecord::new(self.cipher.as_ref(), username, password, extra)?;

        let mut store = self.repo.load()?;
        store.add(platform, record)?;
        self.repo.save(&mut store)?;

        let index = store.accounts(platform).len() - 1;
        info!(%platform, index, "account added");
        Ok(index)
    }

    /// Make the account at `index` (0-based) the platform's active account.
    ///
    /// Returns the activated username.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for an unknown platform or index. The
    /// store is not written in that case.
    pub fn set_active(&self, platform: &str, index: usize) -> Result<String> {
        let platform = parse_platform(platform)?;

        let mut store = self.repo.load()?;
        select::set_active(&mut store, platform, index)?;
        self.repo.save(&mut store)?;

        let username = store.accounts(platform)[index].username.clone();
        info!(%platform, index, "active account changed");
        Ok(username)
    }

    /// Clear the platform's active account.
    ///
    /// Returns whether an account was active. The store is only written if
    /// something changed.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownPlatform` or `StoreError`.
    pub fn deactivate(&self, platform: &str) -> Result<bool> {
        let platform = parse_platform(platform)?;

        let mut store = self.repo.load()?;
        let changed = select::deactivate(&mut store, platform);
        if changed {
            self.repo.save(&mut store)?;
        }
        Ok(changed)
    }

    /// Remove the account at `index` (0-based).
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for an unknown platform or index.
    pub fn remove_account(&self, platform: &str, index: usize) -> Result<AccountRecord> {
        let platform = parse_platform(platform)?;

        let mut store = self.repo.load()?;
        let removed = select::remove(&mut store, platform, index)?;
        self.repo.save(&mut store)?;

        info!(%platform, index, "account removed");
        Ok(removed)
    }

    /// The platform's active account, if any.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownPlatform` or `StoreError`.
    pub fn active(&self, platform: &str) -> Result<Option<AccountRecord>> {
        let platform = parse_platform(platform)?;
        Ok(self.repo.load()?.active(platform).cloned())
    }

    /// Listing of all stored accounts, without secrets.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be loaded.
    pub fn list_accounts(&self) -> Result<Vec<PlatformListing>> {
        Ok(list_accounts(&self.repo.load()?))
    }

    /// Collect the active credentials without touching the env file.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if nothing can be exported.
    pub fn collect_active(&self) -> Result<Export> {
        export_active(&self.repo.load()?, self.cipher.as_ref())
    }

    /// Export the active credentials into the env file.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::NoActiveAccounts` if no platform has an active
    /// account (the env file is left untouched), or an I/O error if the env
    /// file cannot be updated.
    pub fn export_active(&self) -> Result<Export> {
        let export = self.collect_active()?;
        write_env_file(&self.env_path, &export.vars)?;

        info!(
            exported = export.exported_count(),
            skipped = export.skipped.len(),
            path = %self.env_path.display(),
            "active accounts exported"
        );
        Ok(export)
    }

    /// Re-encrypt every stored secret under a new key.
    ///
    /// All secrets are re-encrypted before anything is saved; if any fails to
    /// decrypt, the store is left as it was. On success the vault uses the
    /// new cipher from then on.
    ///
    /// Returns the number of re-encrypted accounts.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if a secret cannot be decrypted with the current
    /// key, or `StoreError` if saving fails.
    pub fn rotate_key(&mut self, new_cipher: AesCtr) -> Result<usize> {
        let mut store = self.repo.load()?;

        let mut count = 0;
        for record in store.records_mut() {
            let plaintext = self.cipher.decrypt(&record.secret)?;
            record.secret = new_cipher.encrypt(&plaintext)?;
            count += 1;
        }
        debug!(count, "secrets re-encrypted in memory");

        self.repo.save(&mut store)?;
        self.cipher = Box::new(new_cipher);

        info!(count, "secret key rotated");
        Ok(count)
    }
}
