//! cli
//!
//! Command-line interface layer for Cartwright.
//!
//! # Responsibilities
//!
//! - Fold every option source into one [`OptionsTable`]
//! - Interpret argv against the command grammar
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. [`run`] folds the cascade over a caller-seeded
//! table (built-in defaults first, then the global config file, then the
//! project-local one, then argv) and hands the resolved table to
//! [`commands::dispatch`]. Later sources override earlier ones key by
//! key; a file that sets two options and an argv that sets a third
//! leaves all three visible to handlers.

pub mod commands;
pub mod grammar;
pub mod interpreter;
pub mod usage;

use std::env;
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::core::config;
use crate::core::options::OptionsTable;
use crate::core::paths;
use crate::ui::state::CliState;

/// Built-in option defaults, the floor of the cascade.
pub const DEFAULT_OPTIONS: &[(&str, &str)] = &[
    ("out-dir", "build"),
    ("emulator", "auto"),
    ("serve-port", "8080"),
];

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`, which owns the
/// table and state. Flags applied before a failure stay visible in
/// `state`, and the caller's error report prints through it.
pub fn run(table: &mut OptionsTable, state: &mut CliState) -> Result<()> {
    let global = paths::locate_config_file(None);
    let cwd = env::current_dir().context("failed to read the current directory")?;
    let local = paths::locate_config_file(Some(&cwd));
    let args: Vec<String> = env::args().skip(1).collect();

    resolve_from(table, state, global.as_deref(), local.as_deref(), &args)?;
    commands::dispatch(table, state)
}

/// Fold the config files and argv into `table`, in cascade order.
///
/// Missing files are skipped without comment; a file that exists but
/// does not parse is an error, annotated with its path so the message
/// points at the right file.
pub fn resolve_from(
    table: &mut OptionsTable,
    state: &mut CliState,
    global: Option<&Path>,
    local: Option<&Path>,
    args: &[String],
) -> Result<()> {
    for path in [global, local].into_iter().flatten() {
        if path.exists() {
            config::load_file(table, path)
                .with_context(|| format!("in config file '{}'", path.display()))?;
        }
    }
    interpreter::interpret(table, state, args.iter().cloned())?;
    Ok(())
}
