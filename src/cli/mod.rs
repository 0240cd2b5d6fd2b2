//! Command-line interface.

pub mod accounts;
pub mod add;
pub mod export;
pub mod input;
pub mod output;
pub mod rotate;

use clap::{Parser, Subcommand};

/// Hutch - encrypted multi-account credentials with .env export.
#[derive(Parser)]
#[command(
    name = "hutch",
    about = "Encrypted multi-account credential vault with .env export",
    version,
    after_help = "Platforms: linkedin, x, tiktok, youtube, facebook, reddit"
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Store a new account (the password is prompted for or read from stdin)
    Add {
        /// Platform (e.g. x, reddit)
        platform: String,
        /// Account username
        username: String,
        /// Optional platform field, repeatable (e.g. --field apiKey=...)
        #[arg(short, long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
    },

    /// List stored accounts
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Make an account the platform's active account
    Use {
        /// Platform
        platform: String,
        /// Account number as shown by `hutch list`
        number: usize,
    },

    /// Clear a platform's active account
    Deactivate {
        /// Platform
        platform: String,
    },

    /// Remove a stored account
    Rm {
        /// Platform
        platform: String,
        /// Account number as shown by `hutch list`
        number: usize,
    },

    /// Write the active accounts' credentials into the env file
    Export,

    /// Re-encrypt all stored secrets under a new key
    Rotate,
}

/// Execute a command.
pub fn execute(command: Command) -> crate::error::Result<()> {
    use Command::*;

    match command {
        Add {
            platform,
            username,
            fields,
        } => add::execute(&platform, &username, &fields),
        List { json } => accounts::list(json),
        Use { platform, number } => accounts::use_account(&platform, number),
        Deactivate { platform } => accounts::deactivate(&platform),
        Rm { platform, number } => accounts::rm(&platform, number),
        Export => export::execute(),
        Rotate => rotate::execute(),
    }
}
