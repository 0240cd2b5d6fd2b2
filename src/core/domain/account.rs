//! Account types.
//!
//! An [`AccountStore`] maps each platform to its accounts in insertion order.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Platform;
use crate::core::cipher::{Cipher, EncryptedSecret};
use crate::core::store::Revision;
use crate::error::{Result, ValidationError};

/// A stored account with its encrypted password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub username: String,
    #[serde(rename = "password")]
    pub secret: EncryptedSecret,
    #[serde(default)]
    pub active: bool,
    pub date_added: DateTime<Utc>,
    /// Platform-specific optional fields (e.g. `apiKey`), stored inline.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl AccountRecord {
    /// Build a new, inactive record, encrypting `password` with `cipher`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` for an empty username or
    /// password, and `CipherError` if encryption fails.
    pub fn new(
        cipher: &dyn Cipher,
        username: &str,
        password: &str,
        extra: BTreeMap<String, String>,
    ) -> Result<Self> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ValidationError::EmptyField("username").into());
        }
        if password.is_empty() {
            return Err(ValidationError::EmptyField("password").into());
        }

        Ok(Self {
            username: username.to_string(),
            secret: cipher.encrypt(password)?,
            active: false,
            date_added: Utc::now(),
            extra,
        })
    }

    /// Non-empty value of an optional field.
    pub fn extra_value(&self, name: &str) -> Option<&str> {
        self.extra
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// All stored accounts, grouped by platform.
///
/// Carries the revision it was loaded at so a save can detect concurrent
/// writers. Equality compares accounts only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountStore {
    accounts: BTreeMap<Platform, Vec<AccountRecord>>,
    #[serde(skip)]
    revision: Revision,
}

impl PartialEq for AccountStore {
    fn eq(&self, other: &Self) -> bool {
        self.accounts == other.accounts
    }
}

impl Eq for AccountStore {}

impl AccountStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts for a platform, in insertion order.
    pub fn accounts(&self, platform: Platform) -> &[AccountRecord] {
        self.accounts
            .get(&platform)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn accounts_mut(&mut self, platform: Platform) -> Option<&mut Vec<AccountRecord>> {
        self.accounts.get_mut(&platform)
    }

    /// Platforms that have at least one stored account, in platform order.
    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.accounts
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(platform, _)| *platform)
    }

    /// The active record for a platform, if any.
    pub fn active(&self, platform: Platform) -> Option<&AccountRecord> {
        self.accounts(platform).iter().find(|r| r.active)
    }

    /// Append a record to a platform's list.
    ///
    /// Other records' active flags are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnsupportedField` if the record carries an
    /// optional field the platform does not define. Nothing is added.
    pub fn add(&mut self, platform: Platform, record: AccountRecord) -> Result<()> {
        if let Some(field) = record
            .extra
            .keys()
            .find(|name| platform.extra_field(name).is_none())
        {
            return Err(ValidationError::UnsupportedField {
                platform,
                field: field.clone(),
            }
            .into());
        }

        self.accounts.entry(platform).or_default().push(record);
        Ok(())
    }

    /// Total number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts.values().map(Vec::len).sum()
    }

    /// Whether no accounts are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Revision this store was loaded at.
    pub fn revision(&self) -> &Revision {
        &self.revision
    }

    pub(crate) fn set_revision(&mut self, revision: Revision) {
        self.revision = revision;
    }

    pub(crate) fn records_mut(&mut self) -> impl Iterator<Item = &mut AccountRecord> {
        self.accounts.values_mut().flatten()
    }
}
