//! Error reporting and exit codes.

use crate::support::*;

#[test]
fn test_missing_key_fails_closed() {
    let t = Test::new();

    let output = t
        .bare_cmd()
        .args(["add", "x", "alice"])
        .write_stdin("pw\n")
        .output()
        .unwrap();

    assert_failure(&output);
    assert_eq!(output.status.code(), Some(1));
    assert_stderr_contains(&output, "no secret key configured");
    assert_stderr_contains(&output, "HUTCH_SECRET_KEY");
    assert!(!t.accounts_path().exists());
}

#[test]
fn test_key_from_configured_file() {
    let t = Test::new();
    let key_path = t.dir.path().join("hutch.key");
    std::fs::write(&key_path, format!("{}\n", TEST_KEY)).unwrap();
    std::fs::write(
        t.dir.path().join(".hutch.toml"),
        "[key]\nfile = \"hutch.key\"\n",
    )
    .unwrap();

    let output = t
        .bare_cmd()
        .args(["add", "x", "alice"])
        .write_stdin("pw\n")
        .output()
        .unwrap();
    assert_success(&output);

    // Readable with the same key from the environment
    assert_success(&t.use_account("x", 1));
    assert_success(&t.export());
    assert!(t.env_text().contains("X_PASSWORD=pw"));
}

#[test]
fn test_invalid_key_length() {
    let t = Test::new();

    let output = t
        .bare_cmd()
        .env("HUTCH_SECRET_KEY", SHORT_KEY)
        .arg("list")
        .output()
        .unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "invalid secret key");
}

#[test]
fn test_malformed_store_is_reported_and_kept() {
    let t = Test::new();
    std::fs::write(t.accounts_path(), "{ not json").unwrap();

    let output = t.add("x", "alice", "pw");

    assert_failure(&output);
    assert_stderr_contains(&output, "malformed");
    assert_eq!(
        std::fs::read_to_string(t.accounts_path()).unwrap(),
        "{ not json"
    );
}

#[test]
fn test_malformed_config_is_reported() {
    let t = Test::new();
    std::fs::write(t.dir.path().join(".hutch.toml"), "[paths\n").unwrap();

    let output = t.list();

    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse .hutch.toml");
}

#[test]
fn test_accounts_path_from_environment() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("HUTCH_ACCOUNTS", "data/store.json")
        .args(["add", "linkedin", "lin"])
        .write_stdin("pw\n")
        .output()
        .unwrap();

    assert_success(&output);
    assert!(t.dir.path().join("data/store.json").exists());
    assert!(!t.accounts_path().exists());
}

#[test]
fn test_verbose_logs_to_stderr() {
    let t = Test::with_accounts(&[("x", "alice", "pw")]);

    let output = t
        .cmd()
        .args(["--verbose", "use", "x", "1"])
        .output()
        .unwrap();

    assert_success(&output);
    assert_stderr_contains(&output, "active account changed");
}
