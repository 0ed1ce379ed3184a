//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`state`] - Process-wide display settings (verbosity, color, answers)
//! - [`output`] - Output formatting and display
//! - [`prompts`] - Interactive prompts and confirmations
//!
//! # Design
//!
//! All non-data output and every prompt goes through this module, reading
//! the shared [`state::CliState`] that the command-line interpreter
//! populates. That keeps `--quiet`, `--no-color`, and the forced-answer
//! flags honored everywhere without each handler re-checking them.

pub mod output;
pub mod prompts;
pub mod state;
