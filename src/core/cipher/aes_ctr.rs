//! AES-256-CTR backend.
//!
//! Keeps the `{iv, content}` layout of the legacy account files (AES-256-CTR,
//! 128-bit big-endian counter seeded with the IV) and adds an HMAC-SHA256
//! tag over `iv || content`. Records without a tag still decrypt.

use ctr::cipher::{KeyIvInit, StreamCipher};
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::trace;
use zeroize::Zeroizing;

use super::{Cipher, EncryptedSecret, IV_LEN, KEY_LEN};
use crate::error::{CipherError, ConfigError, Result};

type Aes256Ctr = ctr::Ctr128BE<aes::Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// Domain separator for the tag key.
const TAG_KEY_CONTEXT: &[u8] = b"hutch/secret-tag/v1";

/// AES-256-CTR cipher with HMAC-SHA256 integrity tags.
pub struct AesCtr {
    key: Zeroizing<[u8; KEY_LEN]>,
    tag_key: Zeroizing<[u8; KEY_LEN]>,
}

impl std::fmt::Debug for AesCtr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesCtr").finish_non_exhaustive()
    }
}

impl AesCtr {
    /// Create a cipher from raw key bytes.
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self::from_key(Zeroizing::new(key))
    }

    fn from_key(key: Zeroizing<[u8; KEY_LEN]>) -> Self {
        let digest = Sha256::new()
            .chain_update(TAG_KEY_CONTEXT)
            .chain_update(&key[..])
            .finalize();

        let mut tag_key = Zeroizing::new([0u8; KEY_LEN]);
        tag_key.copy_from_slice(&digest);

        Self { key, tag_key }
    }

    /// Create a cipher from configured key material.
    ///
    /// Accepts exactly 32 bytes of text (used as the raw key, as legacy
    /// stores do) or 64 hex digits.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSecretKey` if the secret is empty and
    /// `ConfigError::InvalidSecretKey` if it has any other length.
    pub fn from_secret(secret: &str) -> Result<Self> {
        let bytes = secret.as_bytes();
        if bytes.is_empty() {
            return Err(ConfigError::MissingSecretKey.into());
        }

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        if bytes.len() == KEY_LEN {
            key.copy_from_slice(bytes);
        } else if bytes.len() == KEY_LEN * 2 {
            hex::decode_to_slice(secret, &mut key[..]).map_err(|e| {
                ConfigError::InvalidSecretKey(format!("64-character key is not hex: {}", e))
            })?;
        } else {
            return Err(ConfigError::InvalidSecretKey(format!(
                "expected {} characters or {} hex digits, got {} bytes",
                KEY_LEN,
                KEY_LEN * 2,
                bytes.len()
            ))
            .into());
        }

        Ok(Self::from_key(key))
    }

    fn keystream(&self, iv: &[u8]) -> Result<Aes256Ctr> {
        Aes256Ctr::new_from_slices(&self.key[..], iv)
            .map_err(|_| CipherError::InvalidIvLength(iv.len()).into())
    }

    fn mac(&self, iv: &[u8], content: &[u8]) -> Result<HmacSha256> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(&self.tag_key[..])
            .map_err(|e| CipherError::DecryptionFailed(format!("tag key: {}", e)))?;
        mac.update(iv);
        mac.update(content);
        Ok(mac)
    }
}

impl Cipher for AesCtr {
    fn name(&self) -> &'static str {
        "aes-256-ctr"
    }

    fn encrypt(&self, plaintext: &str) -> Result<EncryptedSecret> {
        trace!(plaintext_len = plaintext.len(), "encrypting");

        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);

        let mut content = plaintext.as_bytes().to_vec();
        self.keystream(&iv)?.apply_keystream(&mut content);

        let tag = self.mac(&iv, &content)?.finalize().into_bytes();

        trace!(ciphertext_len = content.len(), "encrypted");

        Ok(EncryptedSecret::new(
            hex::encode(iv),
            hex::encode(&content),
            Some(hex::encode(tag)),
        ))
    }

    fn decrypt(&self, secret: &EncryptedSecret) -> Result<Zeroizing<String>> {
        let iv = decode_hex("iv", secret.iv())?;
        if iv.len() != IV_LEN {
            return Err(CipherError::InvalidIvLength(iv.len()).into());
        }
        let mut buf = Zeroizing::new(decode_hex("content", secret.content())?);

        trace!(ciphertext_len = buf.len(), "decrypting");

        match secret.tag() {
            Some(tag) => {
                let tag = decode_hex("tag", tag)?;
                self.mac(&iv, &buf)?
                    .verify_slice(&tag)
                    .map_err(|_| CipherError::IntegrityCheckFailed)?;
            }
            None => trace!("untagged secret, integrity not verified"),
        }

        self.keystream(&iv)?.apply_keystream(&mut buf);

        let plaintext = std::str::from_utf8(&buf)
            .map_err(|e| CipherError::DecryptionFailed(format!("plaintext is not UTF-8: {}", e)))?;

        Ok(Zeroizing::new(plaintext.to_owned()))
    }
}

fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value).map_err(|e| {
        CipherError::InvalidEncoding {
            field,
            reason: e.to_string(),
        }
        .into()
    })
}
