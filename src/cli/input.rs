//! Secret input.
//!
//! Reads from a hidden prompt on a terminal, or a single line when stdin is
//! piped.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::Password;
use zeroize::Zeroizing;

use crate::error::Result;

/// Whether the user can be prompted.
pub fn interactive() -> bool {
    io::stdin().is_terminal()
}

/// Read a secret, hidden when interactive.
///
/// With `confirm`, the interactive prompt asks twice.
pub fn read_secret(prompt: &str, confirm: bool) -> Result<Zeroizing<String>> {
    if !interactive() {
        let mut line = Zeroizing::new(String::new());
        io::stdin().lock().read_line(&mut line)?;
        let value = line.trim_end_matches(['\r', '\n']);
        return Ok(Zeroizing::new(value.to_string()));
    }

    let mut password = Password::new().with_prompt(prompt);
    if confirm {
        password = password.with_confirmation("Confirm", "values do not match");
    }
    Ok(Zeroizing::new(password.interact()?))
}
