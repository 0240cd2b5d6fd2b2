//! Add command.
//!
//! Stores a new account with a hidden password prompt. On a terminal, any
//! optional platform fields not passed with `--field` are prompted for too.

use dialoguer::Input;
use tracing::info;

use crate::cli::{input, output};
use crate::core::validation::{parse_fields, parse_platform};
use crate::core::vault::Vault;
use crate::error::Result;

/// Add an account.
pub fn execute(platform: &str, username: &str, fields: &[String]) -> Result<()> {
    let platform = parse_platform(platform)?;
    let mut extra = parse_fields(platform, fields)?;
    info!(%platform, "adding account");

    let vault = Vault::open()?;

    let password = input::read_secret(
        &format!("Password for {} on {}", username, platform.display_name()),
        false,
    )?;

    if input::interactive() && fields.is_empty() {
        for field in platform.extra_fields() {
            let value: String = Input::new()
                .with_prompt(format!("{} (optional)", field.label))
                .allow_empty(true)
                .interact_text()?;
            let value = value.trim();
            if !value.is_empty() {
                extra.insert(field.name.to_string(), value.to_string());
            }
        }
    }

    let index = vault.add_account(platform.id(), username, &password, extra)?;

    output::success(&format!(
        "added {} account {} (#{})",
        output::key(platform.id()),
        username.trim(),
        index + 1
    ));
    output::hint(&format!("activate it: hutch use {} {}", platform.id(), index + 1));
    Ok(())
}
