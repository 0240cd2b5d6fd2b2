//! Active credential export.
//!
//! Decrypts the active account of every platform into the platform's fixed
//! env key schema (`X_USERNAME`, `X_PASSWORD`, optional `X_API_KEY`, ...).

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::core::cipher::Cipher;
use crate::core::domain::{AccountStore, Platform};
use crate::core::env::EnvVars;
use crate::error::{ExportError, Result};

/// Result of exporting active accounts.
#[derive(Debug, Default)]
pub struct Export {
    /// Env pairs, grouped by platform in platform order
    pub vars: EnvVars,
    /// Platforms whose active account was exported
    pub exported: Vec<Platform>,
    /// Platforms with no active account
    pub skipped: BTreeSet<Platform>,
    /// Platforms whose active secret could not be decrypted, with the reason
    pub failed: Vec<(Platform, String)>,
}

impl Export {
    /// Number of platforms exported.
    pub fn exported_count(&self) -> usize {
        self.exported.len()
    }
}

/// Collect env pairs for every platform's active account.
///
/// Platforms without an active account are listed in `skipped`. A platform
/// whose secret fails to decrypt is logged, listed in `failed`, and left out
/// while the rest are still exported.
///
/// # Errors
///
/// Returns `ExportError::NoActiveAccounts` if no platform has an active
/// account, and `ExportError::NothingExported` if there were active accounts
/// but none could be decrypted.
pub fn export_active(store: &AccountStore, cipher: &dyn Cipher) -> Result<Export> {
    let mut export = Export::default();

    for platform in Platform::ALL {
        let Some(record) = store.active(platform) else {
            export.skipped.insert(platform);
            continue;
        };

        let password = match cipher.decrypt(&record.secret) {
            Ok(password) => password,
            Err(e) => {
                warn!(%platform, error = %e, "skipping platform: active secret could not be decrypted");
                export.failed.push((platform, e.to_string()));
                continue;
            }
        };

        export
            .vars
            .push(platform.username_key(), record.username.as_str());
        export.vars.push(platform.password_key(), password.as_str());
        for field in platform.extra_fields() {
            if let Some(value) = record.extra_value(field.name) {
                export.vars.push(field.env_key, value);
            }
        }
        export.exported.push(platform);
    }

    debug!(
        exported = export.exported_count(),
        skipped = export.skipped.len(),
        failed = export.failed.len(),
        "active accounts collected"
    );

    if export.exported.is_empty() {
        return Err(if export.failed.is_empty() {
            ExportError::NoActiveAccounts
        } else {
            ExportError::NothingExported(export.failed.len())
        }
        .into());
    }

    Ok(export)
}
