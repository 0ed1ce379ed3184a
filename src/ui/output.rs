//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and filtered by the verbosity in
//! [`CliState`]. Prefixes are colored only when color is enabled there.
//! Data output (resolved values, listings) bypasses this module and goes
//! straight to stdout in the command handlers.

use std::fmt::Display;

use crate::ui::state::{CliState, Verbosity};

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

fn paint(text: &str, color: &str, state: &CliState) -> String {
    if state.color() {
        format!("{}{}{}", color, text, RESET)
    } else {
        text.to_string()
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, state: &CliState) {
    if state.verbosity() != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an extra-detail message (verbose and debug modes only).
pub fn detail(message: impl Display, state: &CliState) {
    if state.verbosity() <= Verbosity::Verbose {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, state: &CliState) {
    if state.verbosity() == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display, state: &CliState) {
    eprintln!("{} {}", paint("error:", RED, state), message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, state: &CliState) {
    if state.verbosity() != Verbosity::Quiet {
        eprintln!("{} {}", paint("warning:", YELLOW, state), message);
    }
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, state: &CliState) {
    if state.verbosity() != Verbosity::Quiet {
        println!("{}", message);
    }
}
