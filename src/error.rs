//! Error types.
//!
//! Each concern has its own enum; [`Error`] wraps them so callers can match
//! on the category and still use `?` everywhere.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::domain::Platform;

/// Top-level error for all hutch operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Configuration and key-material errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no secret key configured: set HUTCH_SECRET_KEY or [key] file in .hutch.toml")]
    MissingSecretKey,

    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse .hutch.toml: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Account store persistence errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read account store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("account store {path} is malformed: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("failed to write account store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("account store {0} was modified by another process; reload and retry")]
    Conflict(PathBuf),
}

/// Encryption and decryption errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("invalid hex in {field}: {reason}")]
    InvalidEncoding { field: &'static str, reason: String },

    #[error("invalid iv length: expected 16 bytes, got {0}")]
    InvalidIvLength(usize),

    #[error("integrity check failed: ciphertext was modified or the key is wrong")]
    IntegrityCheckFailed,

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),
}

/// Input validation errors. Nothing is mutated when one of these is returned.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("unknown platform '{0}' (expected one of: linkedin, x, tiktok, youtube, facebook, reddit)")]
    UnknownPlatform(String),

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("{platform} does not support the field '{field}'")]
    UnsupportedField { platform: Platform, field: String },

    #[error("account numbers start at 1, got {0}")]
    InvalidNumber(usize),

    #[error("no {platform} account at index {index} ({len} stored)")]
    IndexOutOfRange {
        platform: Platform,
        index: usize,
        len: usize,
    },
}

/// Export errors that concern the whole operation rather than one platform.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("no active accounts to export: activate an account first")]
    NoActiveAccounts,

    #[error("none of the {0} active accounts could be decrypted")]
    NothingExported(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
