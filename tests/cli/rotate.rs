//! Tests for `hutch rotate`.

use crate::support::*;

#[test]
fn test_rotate_reencrypts_under_new_key() {
    let t = Test::with_accounts(&[("x", "alice", "pw-x"), ("reddit", "rd", "pw-rd")]);
    assert_success(&t.use_account("x", 1));
    let before = t.accounts_json();

    let output = t.rotate(ROTATED_KEY);

    assert_success(&output);
    assert_stdout_contains(&output, "re-encrypted 2 account(s)");
    let after = t.accounts_json();
    assert_ne!(before["x"][0]["password"], after["x"][0]["password"]);
    assert_eq!(after["x"][0]["active"], true);

    // Old key no longer works
    assert_failure(&t.export());

    let output = t
        .bare_cmd()
        .env("HUTCH_SECRET_KEY", ROTATED_KEY)
        .arg("export")
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.env_text().contains("X_PASSWORD=pw-x"));
}

#[test]
fn test_rotate_rejects_invalid_new_key() {
    let t = Test::with_accounts(&[("x", "alice", "pw")]);
    let before = std::fs::read(t.accounts_path()).unwrap();

    let output = t.rotate(SHORT_KEY);

    assert_failure(&output);
    assert_stderr_contains(&output, "invalid secret key");
    assert_eq!(std::fs::read(t.accounts_path()).unwrap(), before);
}
