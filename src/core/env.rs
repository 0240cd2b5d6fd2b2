//! .env file operations.
//!
//! Active credentials are upserted into an existing env file line by line:
//! the first `KEY=...` line for a key has its value replaced in place, and
//! keys with no line yet are appended. Every other line (comments, unrelated
//! keys, blank lines) is preserved in order, so the merge is idempotent.

use std::fmt;
use std::io;
use std::path::Path;

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::store::replace_file;
use crate::error::Result;

/// Ordered env key/value pairs with zeroized values.
#[derive(Clone, Default)]
pub struct EnvVars {
    entries: Vec<(String, Zeroizing<String>)>,
}

impl EnvVars {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .push((key.into(), Zeroizing::new(value.into())));
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for EnvVars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVars")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = EnvVars::new();
        for (k, v) in iter {
            vars.push(k, v);
        }
        vars
    }
}

/// Upsert `vars` into env file text.
///
/// Existing trailing-newline state is preserved; text that starts empty
/// gets a trailing newline. Text containing any CRLF is written back with
/// CRLF on every line. If a key appears on several lines only the first is
/// updated.
pub fn merge_into_env_text(existing: &str, vars: &EnvVars) -> String {
    let newline = if existing.contains("\r\n") { "\r\n" } else { "\n" };
    let mut lines: Vec<String> = if existing.is_empty() {
        Vec::new()
    } else {
        existing
            .strip_suffix('\n')
            .unwrap_or(existing)
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect()
    };

    for (key, value) in vars.iter() {
        let prefix = format!("{}=", key);
        let mut matches = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.starts_with(&prefix))
            .map(|(i, _)| i);

        let line = format_line(key, value);
        match matches.next() {
            Some(first) => {
                if matches.next().is_some() {
                    warn!(key, "env file defines key more than once; updating the first");
                }
                lines[first] = line;
            }
            None => lines.push(line),
        }
    }

    let mut output = lines.join(newline);
    if !lines.is_empty() && (existing.is_empty() || existing.ends_with('\n')) {
        output.push_str(newline);
    }
    output
}

/// Merge `vars` into the env file at `path`, creating it if needed.
///
/// The file is replaced atomically and left readable only by the owner.
///
/// # Errors
///
/// Returns error if the file cannot be read or written.
pub fn write_env_file(path: &Path, vars: &EnvVars) -> Result<()> {
    let existing = match std::fs::read_to_string(path) {
        Ok(text) => Zeroizing::new(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Zeroizing::new(String::new()),
        Err(e) => return Err(e.into()),
    };

    let merged = Zeroizing::new(merge_into_env_text(&existing, vars));
    replace_file(path, merged.as_bytes())?;

    debug!(path = %path.display(), keys = vars.len(), "env file updated");
    Ok(())
}

fn format_line(key: &str, value: &str) -> String {
    if needs_quotes(value) {
        format!("{}=\"{}\"", key, escape_env_value(value))
    } else {
        format!("{}={}", key, value)
    }
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.chars().any(|ch| ch.is_whitespace())
        || value.contains('#')
        || value.contains('"')
        || value.contains('\'')
        || value.contains('\\')
}

fn escape_env_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }

    escaped
}
