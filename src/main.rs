//! Hutch - encrypted multi-account credential vault.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hutch::cli::output;
use hutch::cli::{execute, Cli};
use hutch::core::constants::LOG_ENV;
use hutch::error::{ConfigError, Error, ExportError, StoreError, ValidationError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("hutch=debug")
        } else {
            EnvFilter::new("hutch=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();

    if let Err(e) = execute(cli.command) {
        output::error(&e.to_string());
        if let Some(hint) = suggestion(&e) {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}

/// Follow-up for errors the user can fix directly.
fn suggestion(e: &Error) -> Option<&'static str> {
    match e {
        Error::Config(ConfigError::MissingSecretKey) => {
            Some("export HUTCH_SECRET_KEY=<32 bytes or 64 hex chars>")
        }
        Error::Config(ConfigError::InvalidSecretKey(_)) => {
            Some("the key must be 32 bytes or 64 hex chars")
        }
        Error::Export(ExportError::NoActiveAccounts) => Some("run: hutch use <platform> <number>"),
        Error::Export(ExportError::NothingExported(_)) => {
            Some("check that HUTCH_SECRET_KEY is the key the accounts were added with")
        }
        Error::Validation(ValidationError::IndexOutOfRange { .. })
        | Error::Validation(ValidationError::InvalidNumber(_)) => Some("run: hutch list"),
        Error::Store(StoreError::Conflict(_)) => Some("another process changed the store; run the command again"),
        _ => None,
    }
}
