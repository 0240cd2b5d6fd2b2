//! Test fixtures and constants.

/// Secret key passed to every test command (32 raw bytes).
pub const TEST_KEY: &str = "hutch-test-key-0123456789abcdef!";

/// Replacement key for rotation tests (64 hex digits).
pub const ROTATED_KEY: &str = "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff";

/// A key with an invalid length.
pub const SHORT_KEY: &str = "too-short";

/// Existing env file with comments and unrelated keys.
pub const SAMPLE_ENV: &str = "# bot settings\nX_USERNAME=old\nFOO=bar\n\nLOG_LEVEL=info\n";
