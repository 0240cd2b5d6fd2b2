//! Tests for `hutch export`.

use crate::support::*;

#[test]
fn test_export_creates_env_file() {
    let t = Test::with_accounts(&[("x", "alice", "secret")]);
    assert_success(&t.use_account("x", 1));

    let output = t.export();

    assert_success(&output);
    assert_stdout_contains(&output, "exported 1 platform(s)");
    assert_eq!(t.env_text(), "X_USERNAME=alice\nX_PASSWORD=secret\n");
}

#[test]
fn test_export_merges_into_existing_env() {
    let t = Test::with_accounts(&[("x", "alice", "secret")]);
    assert_success(&t.use_account("x", 1));
    std::fs::write(t.env_path(), SAMPLE_ENV).unwrap();

    assert_success(&t.export());

    assert_eq!(
        t.env_text(),
        "# bot settings\nX_USERNAME=alice\nFOO=bar\n\nLOG_LEVEL=info\nX_PASSWORD=secret\n"
    );
}

#[test]
fn test_export_twice_is_idempotent() {
    let t = Test::with_accounts(&[("linkedin", "lin", "pw"), ("reddit", "rd", "pw two")]);
    assert_success(&t.use_account("linkedin", 1));
    assert_success(&t.use_account("reddit", 1));

    assert_success(&t.export());
    let first = t.env_text();
    assert_success(&t.export());

    assert_eq!(t.env_text(), first);
    assert!(first.contains("REDDIT_PASSWORD=\"pw two\""));
}

#[test]
fn test_export_follows_active_switch() {
    let t = Test::with_accounts(&[("tiktok", "one", "pw1"), ("tiktok", "two", "pw2")]);
    assert_success(&t.use_account("tiktok", 1));
    assert_success(&t.export());

    assert_success(&t.use_account("tiktok", 2));
    assert_success(&t.export());

    assert_eq!(t.env_text(), "TIKTOK_USERNAME=two\nTIKTOK_PASSWORD=pw2\n");
}

#[test]
fn test_export_includes_optional_fields() {
    let t = Test::new();
    assert_success(&t.add_with_fields(
        "youtube",
        "yt",
        "pw",
        &["clientId=cid", "clientSecret=csec"],
    ));
    assert_success(&t.use_account("youtube", 1));

    assert_success(&t.export());

    assert_eq!(
        t.env_text(),
        "YOUTUBE_USERNAME=yt\nYOUTUBE_PASSWORD=pw\nYOUTUBE_CLIENT_ID=cid\nYOUTUBE_CLIENT_SECRET=csec\n"
    );
}

#[test]
fn test_export_reports_skipped_platforms() {
    let t = Test::with_accounts(&[("x", "alice", "pw"), ("reddit", "rd", "pw")]);
    assert_success(&t.use_account("x", 1));

    let output = t.export();

    assert_success(&output);
    assert_stdout_contains(&output, "no active account: linkedin, tiktok, youtube, facebook, reddit");
    assert!(!t.env_text().contains("REDDIT"));
}

#[test]
fn test_export_without_active_accounts_fails() {
    let t = Test::with_accounts(&[("x", "alice", "pw")]);
    std::fs::write(t.env_path(), SAMPLE_ENV).unwrap();

    let output = t.export();

    assert_failure(&output);
    assert_stderr_contains(&output, "no active accounts");
    assert_stderr_contains(&output, "hutch use");
    assert_eq!(t.env_text(), SAMPLE_ENV);
}

#[test]
fn test_export_with_wrong_key_fails() {
    let t = Test::with_accounts(&[("x", "alice", "pw")]);
    assert_success(&t.use_account("x", 1));

    let output = t
        .bare_cmd()
        .env("HUTCH_SECRET_KEY", ROTATED_KEY)
        .arg("export")
        .output()
        .unwrap();

    assert_failure(&output);
    assert_stderr_contains(&output, "could be decrypted");
    assert!(!t.env_path().exists());
}

#[test]
fn test_export_to_configured_env_file() {
    let t = Test::with_accounts(&[("facebook", "fb", "pw")]);
    assert_success(&t.use_account("facebook", 1));
    std::fs::write(
        t.dir.path().join(".hutch.toml"),
        "[paths]\nenv = \"bot/.env.local\"\n",
    )
    .unwrap();

    assert_success(&t.export());

    let text = std::fs::read_to_string(t.dir.path().join("bot/.env.local")).unwrap();
    assert!(text.contains("FACEBOOK_USERNAME=fb"));
    assert!(!t.env_path().exists());
}
