//! Active account selection.
//!
//! Each platform has at most one active account. These functions mutate an
//! in-memory [`AccountStore`]; validation always runs before any record is
//! touched, so a failed call leaves the store exactly as it was.

use tracing::debug;

use crate::core::domain::{AccountRecord, AccountStore, Platform};
use crate::error::{Result, ValidationError};

fn out_of_range(store: &AccountStore, platform: Platform, index: usize) -> ValidationError {
    ValidationError::IndexOutOfRange {
        platform,
        index,
        len: store.accounts(platform).len(),
    }
}

/// Make the account at `index` (0-based) the only active one for `platform`.
///
/// # Errors
///
/// Returns `ValidationError::IndexOutOfRange` if the platform has no account
/// at `index`.
pub fn set_active(store: &mut AccountStore, platform: Platform, index: usize) -> Result<()> {
    if index >= store.accounts(platform).len() {
        return Err(out_of_range(store, platform, index).into());
    }

    if let Some(records) = store.accounts_mut(platform) {
        for (i, record) in records.iter_mut().enumerate() {
            record.active = i == index;
        }
    }

    debug!(%platform, index, "active account set");
    Ok(())
}

/// Clear the active flag on every account of `platform`.
///
/// Returns whether an account was active before the call.
pub fn deactivate(store: &mut AccountStore, platform: Platform) -> bool {
    let mut was_active = false;
    if let Some(records) = store.accounts_mut(platform) {
        for record in records.iter_mut() {
            was_active |= record.active;
            record.active = false;
        }
    }

    debug!(%platform, was_active, "platform deactivated");
    was_active
}

/// Remove the account at `index` (0-based) from `platform`.
///
/// Removing the active account leaves the platform with none active.
///
/// # Errors
///
/// Returns `ValidationError::IndexOutOfRange` if the platform has no account
/// at `index`.
pub fn remove(store: &mut AccountStore, platform: Platform, index: usize) -> Result<AccountRecord> {
    let len = store.accounts(platform).len();
    match store.accounts_mut(platform) {
        Some(records) if index < len => {
            let removed = records.remove(index);
            debug!(%platform, index, "account removed");
            Ok(removed)
        }
        _ => Err(ValidationError::IndexOutOfRange {
            platform,
            index,
            len,
        }
        .into()),
    }
}
