//! Core library components.
//!
//! This module contains the reusable business logic for account storage,
//! secret encryption, active-account selection, and env export.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod domain;
pub mod env;
pub mod export;
pub mod select;
pub mod store;
pub mod validation;
pub mod vault;
