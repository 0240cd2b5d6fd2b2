//! Account listing.
//!
//! A read-only projection of the store for display. Never includes secrets.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{AccountStore, Platform};

/// One account as shown in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    /// 1-based position, as used when selecting an account
    pub number: usize,
    pub username: String,
    pub active: bool,
    pub date_added: DateTime<Utc>,
    /// Names of optional fields that have a value
    pub fields: Vec<String>,
}

/// All accounts of one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformListing {
    pub platform: Platform,
    pub accounts: Vec<AccountSummary>,
}

impl PlatformListing {
    /// The active account's summary, if any.
    pub fn active(&self) -> Option<&AccountSummary> {
        self.accounts.iter().find(|a| a.active)
    }
}

/// Build a listing of every platform that has stored accounts.
pub fn list_accounts(store: &AccountStore) -> Vec<PlatformListing> {
    store
        .platforms()
        .map(|platform| PlatformListing {
            platform,
            accounts: store
                .accounts(platform)
                .iter()
                .enumerate()
                .map(|(i, record)| AccountSummary {
                    number: i + 1,
                    username: record.username.clone(),
                    active: record.active,
                    date_added: record.date_added,
                    fields: record
                        .extra
                        .iter()
                        .filter(|(_, v)| !v.is_empty())
                        .map(|(k, _)| k.clone())
                        .collect(),
                })
                .collect(),
        })
        .collect()
}
