//! core::config
//!
//! Config file syntax: loading into an options table and writing back.
//!
//! # Syntax
//!
//! UTF-8 text, one entry per line:
//!
//! ```text
//! # comment
//! out-dir = dist
//! title = "Space Courier 2"
//! fullscreen
//! ```
//!
//! - `key = value` sets an entry; the value may be double-quoted to embed
//!   whitespace, and a quoted value is taken verbatim between the first
//!   and last quote on the line.
//! - A bare `key` is shorthand for `key = true`.
//! - Blank lines and lines starting with `#` are ignored.
//! - Whitespace around keys and unquoted values is trimmed.
//!
//! Keys are matched with the same normalization as the runtime table, so
//! `out-dir` in a file and `--out_dir` on the command line collide on
//! purpose.
//!
//! # Cascading
//!
//! [`load_str`] and [`load_file`] write every parsed pair into the given
//! table through its normalized `set`, so loading a second source after a
//! first overrides exactly the keys the second source defines. A key
//! repeated within one source keeps its last occurrence.
//!
//! # Failure
//!
//! Malformed text fails the load with [`ConfigError::SyntaxError`]
//! carrying the one-based line number. A missing or unreadable file is
//! the distinct [`ConfigError::ReadError`], so callers can skip absent
//! files while still refusing broken ones.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::options::{normalize_key, OptionsTable};

/// Errors from config file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config syntax error on line {line}: {message}")]
    SyntaxError { line: usize, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot store '{key}': keys and values must not contain line breaks")]
    UnstorableError { key: String },
}

/// Parse one line into a key/value pair.
///
/// Returns `Ok(None)` for blank and comment lines, `Err(message)` for
/// malformed ones. The caller supplies the line number.
fn parse_line(line: &str) -> Result<Option<(String, String)>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let Some(eq) = trimmed.find('=') else {
        // Bare key: implicit true.
        return Ok(Some((trimmed.to_string(), "true".to_string())));
    };

    let key = trimmed[..eq].trim();
    if key.is_empty() {
        return Err("missing key before '='".to_string());
    }

    let raw = trimmed[eq + 1..].trim();
    if let Some(quoted) = raw.strip_prefix('"') {
        // The closing quote is the last one on the line; anything after it
        // must be whitespace (already trimmed away).
        let Some(close) = quoted.rfind('"') else {
            return Err("unterminated quoted value".to_string());
        };
        if !quoted[close + 1..].is_empty() {
            return Err(format!(
                "unexpected text after closing quote: '{}'",
                &quoted[close + 1..]
            ));
        }
        return Ok(Some((key.to_string(), quoted[..close].to_string())));
    }

    Ok(Some((key.to_string(), raw.to_string())))
}

/// Load config text into an options table.
///
/// Lines before a malformed one are already applied when the error is
/// returned; treat a failed load as "this source contributed nothing"
/// and abort the operation.
///
/// # Errors
///
/// Returns [`ConfigError::SyntaxError`] for the first malformed line.
pub fn load_str(table: &mut OptionsTable, text: &str) -> Result<(), ConfigError> {
    for (index, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(Some((key, value))) => table.set(&key, &value),
            Ok(None) => {}
            Err(message) => {
                return Err(ConfigError::SyntaxError {
                    line: index + 1,
                    message,
                })
            }
        }
    }
    Ok(())
}

/// Load a config file into an options table.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] when the file cannot be read
/// (including when it does not exist) and [`ConfigError::SyntaxError`]
/// when it parses badly. Callers that treat a missing file as an empty
/// source should check existence first, as the resolution pipeline does.
pub fn load_file(table: &mut OptionsTable, path: &Path) -> Result<(), ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_str(table, &contents)
}

/// Read a config file as an ordered pair list.
///
/// Unlike [`load_file`] this preserves file order and key spelling, which
/// the `config` command relies on to rewrite files without shuffling
/// them. Bare keys come back with the value `true`.
pub fn read_pairs(path: &Path) -> Result<Vec<(String, String)>, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    read_pairs_str(&contents)
}

/// Parse config text as an ordered pair list.
pub fn read_pairs_str(text: &str) -> Result<Vec<(String, String)>, ConfigError> {
    let mut pairs = Vec::new();
    for (index, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(pair)) => pairs.push(pair),
            Ok(None) => {}
            Err(message) => {
                return Err(ConfigError::SyntaxError {
                    line: index + 1,
                    message,
                })
            }
        }
    }
    Ok(pairs)
}

/// Render a value for a config line, quoting when the bare form would
/// not survive a reload or could be mistaken for a comment.
///
/// Quotes are added for an empty value, a value with leading or trailing
/// whitespace, a value that itself starts with a quote, and a value
/// containing `#`. Values containing a line break are not representable
/// in this syntax at all; [`save_pairs`] rejects them.
pub fn format_value(value: &str) -> String {
    if value.is_empty()
        || value != value.trim()
        || value.starts_with('"')
        || value.contains('#')
    {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    }
}

/// Render one `key = value` config line.
pub fn format_line(key: &str, value: &str) -> String {
    format!("{} = {}", key, format_value(value))
}

fn has_line_break(text: &str) -> bool {
    text.contains('\n') || text.contains('\r')
}

/// Write pairs to a config file, one line each, in order.
///
/// Creates parent directories if needed. Uses atomic write (write to
/// temp file, then rename) to prevent corruption.
///
/// # Errors
///
/// Returns [`ConfigError::UnstorableError`] when a key or value contains
/// a line break, which one line cannot carry; the check runs before any
/// filesystem step, so a rejected save leaves an existing file
/// untouched. Returns [`ConfigError::WriteError`] if a filesystem step
/// fails.
pub fn save_pairs(path: &Path, pairs: &[(String, String)]) -> Result<(), ConfigError> {
    for (key, value) in pairs {
        if has_line_break(key) || has_line_break(value) {
            return Err(ConfigError::UnstorableError { key: key.clone() });
        }
    }

    let write_error = |e: std::io::Error, p: &Path| ConfigError::WriteError {
        path: p.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| write_error(e, path))?;
    }

    let mut contents = String::new();
    for (key, value) in pairs {
        contents.push_str(&format_line(key, value));
        contents.push('\n');
    }

    // Write to temp file in same directory (for atomic rename).
    let temp_path = path.with_extension("cfg.tmp");
    let mut file = fs::File::create(&temp_path).map_err(|e| write_error(e, &temp_path))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| write_error(e, &temp_path))?;
    file.sync_all().map_err(|e| write_error(e, &temp_path))?;

    fs::rename(&temp_path, path).map_err(|e| write_error(e, path))
}

/// Upsert a pair in an ordered pair list by normalized key.
///
/// The first matching pair keeps its position and spelling but takes the
/// new value; later duplicates are dropped. An unmatched key is appended.
pub fn upsert_pair(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    let normalized = normalize_key(key);
    let mut found = false;
    pairs.retain_mut(|(k, v)| {
        if normalize_key(k) == normalized {
            if found {
                return false;
            }
            found = true;
            *v = value.to_string();
        }
        true
    });
    if !found {
        pairs.push((key.to_string(), value.to_string()));
    }
}

/// Drop every pair whose key normalizes to `key`.
///
/// Returns true when at least one pair was removed.
pub fn remove_pair(pairs: &mut Vec<(String, String)>, key: &str) -> bool {
    let normalized = normalize_key(key);
    let before = pairs.len();
    pairs.retain(|(k, _)| normalize_key(k) != normalized);
    pairs.len() != before
}
