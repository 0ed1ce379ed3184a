//! core::options
//!
//! Normalized key/value store for resolved tool options.
//!
//! # Overview
//!
//! Every option cartwright resolves, whether it came from built-in defaults,
//! a config file, or the command line, lands in an [`OptionsTable`]. The
//! table is the single currency between the resolution layers and the
//! command implementations.
//!
//! # Key Normalization
//!
//! Keys are normalized before every lookup and insertion: lowercased, with
//! `-` and `_` stripped. `out-dir`, `OUT_DIR`, and `outdir` are the same
//! entry. See [`normalize_key`].
//!
//! # Typed Access
//!
//! Values are stored as strings and converted on demand. The typed getters
//! never fail: a key that is absent, or present with a value that does not
//! convert to the requested type, yields the caller's default. The table may
//! legitimately hold differently-typed data under a key a caller queries
//! with another type, so the fallback is silent.
//!
//! # Example
//!
//! ```
//! use cartwright::core::options::OptionsTable;
//!
//! let mut table = OptionsTable::new();
//! table.set("Out-Dir", "dist");
//! assert_eq!(table.get("out_dir").unwrap(), "dist");
//! assert_eq!(table.get_or("serve-port", 8080), 8080);
//! ```

use std::collections::HashMap;
use thiserror::Error;

/// Errors from table operations.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("option '{0}' is not set")]
    MissingKey(String),
}

/// Normalize an option key for storage and comparison.
///
/// Lowercases the key and strips `-` and `_`, so differently-spelled
/// keys that mean the same thing collapse to one entry. Normalization
/// is idempotent.
///
/// # Example
///
/// ```
/// use cartwright::core::options::normalize_key;
///
/// assert_eq!(normalize_key("serve-port"), "serveport");
/// assert_eq!(normalize_key("SERVE_PORT"), "serveport");
/// assert_eq!(normalize_key(&normalize_key("Serve-Port")), "serveport");
/// ```
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|&c| c != '-' && c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Parse a stored option value as a boolean.
///
/// The empty string is `true`: a flag present without a value is an
/// assertion. `on`/`true`/`1` and `off`/`false`/`0` parse case
/// insensitively. Anything else is `None`.
pub fn parse_bool(value: &str) -> Option<bool> {
    if value.is_empty() {
        return Some(true);
    }
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "1" => Some(true),
        "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Parse a stored option value as a decimal integer.
pub fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// Conversion between stored string values and typed option values.
///
/// Implemented for the types the table hands out: `bool`, `i64`, and
/// `String`. `from_stored` returns `None` when the stored text does not
/// represent the type, which the typed getters turn into their default.
pub trait OptionValue: Sized {
    /// Convert a stored string into this type, if it parses.
    fn from_stored(raw: &str) -> Option<Self>;

    /// Render this value in the canonical stored form.
    fn to_stored(&self) -> String;
}

impl OptionValue for bool {
    fn from_stored(raw: &str) -> Option<Self> {
        parse_bool(raw)
    }

    fn to_stored(&self) -> String {
        if *self { "true".to_string() } else { "false".to_string() }
    }
}

impl OptionValue for i64 {
    fn from_stored(raw: &str) -> Option<Self> {
        parse_int(raw)
    }

    fn to_stored(&self) -> String {
        self.to_string()
    }
}

impl OptionValue for String {
    fn from_stored(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    fn to_stored(&self) -> String {
        self.clone()
    }
}

/// Normalized string-to-string option store.
///
/// Created empty or from literal pairs, filled by the config cascade and
/// the command-line interpreter, and read by command implementations.
/// One table lives for one tool invocation.
#[derive(Debug, Clone, Default)]
pub struct OptionsTable {
    entries: HashMap<String, String>,
}

impl OptionsTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table pre-populated from literal pairs.
    ///
    /// Later pairs override earlier ones that normalize to the same key.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut table = Self::new();
        for (key, value) in pairs {
            table.set(key, value);
        }
        table
    }

    /// Set a value, replacing any existing entry for the normalized key.
    pub fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(normalize_key(key), value.to_string());
    }

    /// Get the raw stored value for a key.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::MissingKey`] if the key is not set. Code
    /// that can tolerate absence should use [`get_or`](Self::get_or)
    /// instead.
    pub fn get(&self, key: &str) -> Result<&str, OptionsError> {
        let normalized = normalize_key(key);
        self.entries
            .get(&normalized)
            .map(String::as_str)
            .ok_or(OptionsError::MissingKey(normalized))
    }

    /// Check whether a key is set.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&normalize_key(key))
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set a typed value in its canonical stored form.
    pub fn set_value<T: OptionValue>(&mut self, key: &str, value: T) {
        self.set(key, &value.to_stored());
    }

    /// Get a typed value, falling back to `default`.
    ///
    /// The fallback covers both an absent key and a stored value that does
    /// not convert to `T`. Neither case is an error.
    pub fn get_or<T: OptionValue>(&self, key: &str, default: T) -> T {
        match self.get(key) {
            Ok(raw) => T::from_stored(raw).unwrap_or(default),
            Err(_) => default,
        }
    }

    /// Get a typed value from the first key in `keys` that is set and
    /// converts, falling back to `default`.
    ///
    /// Keys are tried in the given order; the first set key wins even if
    /// its value fails to convert (the default is returned, later keys are
    /// not consulted).
    pub fn get_first_or<T: OptionValue>(&self, keys: &[&str], default: T) -> T {
        for key in keys {
            if let Ok(raw) = self.get(key) {
                return T::from_stored(raw).unwrap_or(default);
            }
        }
        default
    }

    /// Get a typed value, storing `value` when the key is absent or the
    /// stored text does not convert to `T`.
    ///
    /// An existing value of the wrong type is overwritten, not preserved,
    /// so a read following this call always agrees with what was returned.
    pub fn get_or_insert<T: OptionValue + Clone>(&mut self, key: &str, value: T) -> T {
        if let Ok(raw) = self.get(key) {
            if let Some(existing) = T::from_stored(raw) {
                return existing;
            }
        }
        self.set_value(key, value.clone());
        value
    }

    /// Fill the first unset slot in `slots` with `value`, or set `help`
    /// when every slot is already taken.
    ///
    /// Presence is checked against the whole table, so a slot supplied by
    /// a config file counts as filled. This is how excess positional
    /// arguments become a help request instead of an error.
    pub fn fill_slot_or_help(&mut self, slots: &[&str], value: &str) {
        for slot in slots {
            if !self.contains(slot) {
                self.set(slot, value);
                return;
            }
        }
        self.set("help", "true");
    }
}
