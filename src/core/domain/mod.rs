//! Domain types.

mod account;
mod listing;
mod platform;

pub use account::{AccountRecord, AccountStore};
pub use listing::{list_accounts, AccountSummary, PlatformListing};
pub use platform::{ExtraField, Platform};
