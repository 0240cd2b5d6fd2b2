//! Export command - write active credentials into the env file.

use crate::cli::output;
use crate::core::vault::Vault;
use crate::error::Result;

/// Export every platform's active account into the env file.
pub fn execute() -> Result<()> {
    let vault = Vault::open()?;
    let export = vault.export_active()?;

    output::success(&format!(
        "exported {} platform(s) to {}",
        export.exported_count(),
        output::path(vault.env_path())
    ));
    for platform in &export.exported {
        output::list_item(platform.display_name());
    }

    for (platform, reason) in &export.failed {
        output::warn(&format!("{} skipped: {}", platform.id(), reason));
    }

    if !export.skipped.is_empty() {
        let names: Vec<&str> = export.skipped.iter().map(|p| p.id()).collect();
        output::dimmed(&format!("no active account: {}", names.join(", ")));
    }

    Ok(())
}
