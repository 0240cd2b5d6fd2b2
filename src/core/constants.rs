//! Constants used throughout hutch.
//!
//! Centralizes file names and environment variable names.

/// Optional configuration file name (.hutch.toml).
pub const CONFIG_FILE: &str = ".hutch.toml";

/// Default account store file name.
pub const ACCOUNTS_FILE: &str = "accounts.json";

/// Default env file the active credentials are exported to.
pub const ENV_FILE: &str = ".env";

/// Environment variable holding the secret key.
pub const SECRET_KEY_ENV: &str = "HUTCH_SECRET_KEY";

/// Environment variable overriding the account store path.
pub const ACCOUNTS_ENV: &str = "HUTCH_ACCOUNTS";

/// Environment variable overriding the env file path.
pub const ENV_FILE_ENV: &str = "HUTCH_ENV_FILE";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "HUTCH_LOG";
