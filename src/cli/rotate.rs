//! Rotate command - re-encrypt every stored secret under a new key.

use tracing::info;

use crate::cli::{input, output};
use crate::core::cipher::AesCtr;
use crate::core::constants::SECRET_KEY_ENV;
use crate::core::vault::Vault;
use crate::error::Result;

/// Execute key rotation.
pub fn execute() -> Result<()> {
    info!("starting key rotation");

    let mut vault = Vault::open()?;

    let secret = input::read_secret("New secret key (32 bytes or 64 hex chars)", true)?;
    let new_cipher = AesCtr::from_secret(&secret)?;

    let count = vault.rotate_key(new_cipher)?;

    output::success(&format!("re-encrypted {} account(s)", count));
    output::hint(&format!(
        "update {} (or your key file) to the new key",
        SECRET_KEY_ENV
    ));
    Ok(())
}
