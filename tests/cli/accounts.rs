//! Tests for `hutch list`, `use`, `deactivate`, and `rm`.

use crate::support::*;

#[test]
fn test_list_empty() {
    let t = Test::new();

    let output = t.list();

    assert_success(&output);
    assert_stdout_contains(&output, "no accounts stored");
}

#[test]
fn test_list_shows_numbers_and_active_marker() {
    let t = Test::with_accounts(&[("x", "alice", "pw1"), ("x", "bob", "pw2")]);
    assert_success(&t.use_account("x", 2));

    let output = t.list();

    assert_success(&output);
    assert_stdout_contains(&output, "X (Twitter)");
    assert_stdout_contains(&output, "1. alice");
    assert_stdout_contains(&output, "2. bob  (active)");
    assert_stdout_excludes(&output, "pw1");
}

#[test]
fn test_list_json() {
    let t = Test::with_accounts(&[("reddit", "r1", "pw"), ("linkedin", "l1", "pw")]);

    let output = t.list_json();

    assert_success(&output);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let listing = json.as_array().unwrap();
    assert_eq!(listing.len(), 2);
    // Platform order, not insertion order
    assert_eq!(listing[0]["platform"], "linkedin");
    assert_eq!(listing[1]["platform"], "reddit");
    assert_eq!(listing[1]["accounts"][0]["number"], 1);
    assert!(!stdout(&output).contains("password"));
}

#[test]
fn test_use_switches_active_account() {
    let t = Test::with_accounts(&[("facebook", "a", "pw"), ("facebook", "b", "pw")]);

    assert_success(&t.use_account("facebook", 1));
    let output = t.use_account("facebook", 2);

    assert_success(&output);
    assert_stdout_contains(&output, "facebook now uses b");
    let store = t.accounts_json();
    assert_eq!(store["facebook"][0]["active"], false);
    assert_eq!(store["facebook"][1]["active"], true);
}

#[test]
fn test_use_out_of_range_leaves_store_unchanged() {
    let t = Test::with_accounts(&[("x", "a", "pw"), ("x", "b", "pw")]);
    assert_success(&t.use_account("x", 1));
    let before = std::fs::read(t.accounts_path()).unwrap();

    let output = t.use_account("x", 99);

    assert_failure(&output);
    assert_stderr_contains(&output, "no x account at index 98 (2 stored)");
    assert_stderr_contains(&output, "hutch list");
    assert_eq!(std::fs::read(t.accounts_path()).unwrap(), before);
}

#[test]
fn test_use_zero_is_rejected() {
    let t = Test::with_accounts(&[("x", "a", "pw")]);

    let output = t.use_account("x", 0);

    assert_failure(&output);
    assert_stderr_contains(&output, "account numbers start at 1");
}

#[test]
fn test_use_platform_without_accounts() {
    let t = Test::with_accounts(&[("x", "a", "pw")]);

    let output = t.use_account("tiktok", 1);

    assert_failure(&output);
    assert_stderr_contains(&output, "(0 stored)");
}

#[test]
fn test_deactivate() {
    let t = Test::with_accounts(&[("youtube", "yt", "pw")]);
    assert_success(&t.use_account("youtube", 1));

    let output = t.deactivate("youtube");
    assert_success(&output);
    assert_stdout_contains(&output, "youtube has no active account");
    assert_eq!(t.accounts_json()["youtube"][0]["active"], false);

    let again = t.deactivate("youtube");
    assert_success(&again);
    assert_stdout_contains(&again, "had no active account");
}

#[test]
fn test_rm_removes_account_and_renumbers() {
    let t = Test::with_accounts(&[("reddit", "r1", "pw"), ("reddit", "r2", "pw")]);
    assert_success(&t.use_account("reddit", 1));

    let output = t.rm("reddit", 1);

    assert_success(&output);
    assert_stdout_contains(&output, "removed reddit account r1");
    assert_stdout_contains(&output, "no longer has an active account");
    let store = t.accounts_json();
    assert_eq!(store["reddit"].as_array().unwrap().len(), 1);
    assert_eq!(store["reddit"][0]["username"], "r2");
}

#[test]
fn test_rm_out_of_range() {
    let t = Test::with_accounts(&[("reddit", "r1", "pw")]);

    assert_failure(&t.rm("reddit", 5));
    assert_eq!(t.accounts_json()["reddit"].as_array().unwrap().len(), 1);
}
