//! Hutch - encrypted multi-account credential vault with .env export.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── add           # Add an account (hidden password prompt)
//! │   ├── accounts      # list, use, deactivate, rm
//! │   ├── export        # Write active credentials to .env
//! │   └── rotate        # Re-encrypt under a new key
//! └── core/             # Core library components
//!     ├── config        # .hutch.toml and secret key resolution
//!     ├── cipher/       # Secret encryption
//!     │   ├── mod       # Cipher trait, EncryptedSecret
//!     │   └── aes_ctr   # AES-256-CTR + HMAC-SHA256
//!     ├── domain/       # Platform, AccountRecord, AccountStore, listings
//!     ├── store/        # Account store persistence
//!     │   ├── mod       # Repository trait, revisions
//!     │   ├── fs        # Atomic JSON file
//!     │   └── memory    # In-memory bytes
//!     ├── select        # Active account selection
//!     ├── export        # Active accounts to env pairs
//!     ├── env           # .env merge
//!     └── vault         # Load, mutate, save facade
//! ```
//!
//! # Features
//!
//! - Several accounts per platform, at most one active
//! - Passwords encrypted with AES-256-CTR and authenticated with HMAC-SHA256
//! - Idempotent merge of active credentials into an existing .env file
//! - Optimistic concurrency: concurrent writers get a conflict, not lost data

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::cipher::{AesCtr, Cipher, EncryptedSecret};
pub use crate::core::domain::{AccountRecord, AccountStore, Platform};
pub use crate::core::store::{FileRepository, MemoryRepository, Repository};
pub use crate::core::vault::Vault;
pub use crate::error::{Error, Result};
