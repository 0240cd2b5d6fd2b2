//! Secret encryption.
//!
//! Account passwords are encrypted one at a time into an [`EncryptedSecret`]
//! (`{iv, content, tag?}`, all hex). The [`Cipher`] trait is the seam between
//! the vault and the concrete algorithm.
//!
//! ## Backends
//!
//! - **aes-256-ctr**: Default. AES-256 in CTR mode with a random 16-byte IV
//!   and an HMAC-SHA256 tag over `iv || content`.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::Result;

mod aes_ctr;

pub use aes_ctr::AesCtr;

/// Length of the random IV in bytes.
pub const IV_LEN: usize = 16;

/// Length of the symmetric key in bytes.
pub const KEY_LEN: usize = 32;

/// Symmetric cipher for single secret strings.
pub trait Cipher {
    /// Encrypt a plaintext secret.
    ///
    /// Every call uses a fresh IV, so encrypting the same plaintext twice
    /// yields different ciphertexts.
    ///
    /// # Errors
    ///
    /// Returns `CipherError` if the cipher cannot be initialised.
    fn encrypt(&self, plaintext: &str) -> Result<EncryptedSecret>;

    /// Decrypt a secret produced by [`Cipher::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns `CipherError` on malformed hex, a bad IV length, a failed
    /// integrity check, or a plaintext that is not valid UTF-8.
    fn decrypt(&self, secret: &EncryptedSecret) -> Result<Zeroizing<String>>;

    /// Backend name for display/logs.
    fn name(&self) -> &'static str;
}

/// An encrypted secret as persisted in the account store.
///
/// Only a [`Cipher`] (or deserialization) creates these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedSecret {
    iv: String,
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
}

impl EncryptedSecret {
    pub(super) fn new(iv: String, content: String, tag: Option<String>) -> Self {
        Self { iv, content, tag }
    }

    /// Hex-encoded IV
    pub fn iv(&self) -> &str {
        &self.iv
    }

    /// Hex-encoded ciphertext
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Hex-encoded integrity tag, absent on legacy records
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}
