//! Account management commands: list, use, deactivate, rm.

use tracing::info;

use crate::cli::output;
use crate::core::validation::{number_to_index, parse_platform};
use crate::core::vault::Vault;
use crate::error::Result;

/// List stored accounts.
pub fn list(json: bool) -> Result<()> {
    let vault = Vault::open()?;
    let listing = vault.list_accounts()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    if listing.is_empty() {
        output::dimmed("no accounts stored");
        output::hint("run: hutch add <platform> <username>");
        return Ok(());
    }

    for platform in listing {
        println!();
        output::header(platform.platform.display_name());
        output::rule();
        for account in &platform.accounts {
            let mut line = format!("{}. {}", account.number, account.username);
            if account.active {
                line.push_str("  (active)");
            }
            if !account.fields.is_empty() {
                line.push_str(&format!("  [{}]", account.fields.join(", ")));
            }
            output::list_item(&line);
        }
    }

    Ok(())
}

/// Make the account numbered `number` the platform's active account.
pub fn use_account(platform: &str, number: usize) -> Result<()> {
    let platform = parse_platform(platform)?;
    let index = number_to_index(number)?;
    info!(%platform, number, "switching active account");

    let vault = Vault::open()?;
    let username = vault.set_active(platform.id(), index)?;

    output::success(&format!(
        "{} now uses {}",
        output::key(platform.id()),
        username
    ));
    Ok(())
}

/// Clear the platform's active account.
pub fn deactivate(platform: &str) -> Result<()> {
    let platform = parse_platform(platform)?;

    let vault = Vault::open()?;
    if vault.deactivate(platform.id())? {
        output::success(&format!("{} has no active account", output::key(platform.id())));
    } else {
        output::dimmed(&format!("{} had no active account", platform.id()));
    }
    Ok(())
}

/// Remove the account numbered `number`.
pub fn rm(platform: &str, number: usize) -> Result<()> {
    let platform = parse_platform(platform)?;
    let index = number_to_index(number)?;
    info!(%platform, number, "removing account");

    let vault = Vault::open()?;
    let removed = vault.remove_account(platform.id(), index)?;

    output::success(&format!(
        "removed {} account {}",
        output::key(platform.id()),
        removed.username
    ));
    if removed.active {
        output::warn(&format!("{} no longer has an active account", platform.id()));
    }
    Ok(())
}
