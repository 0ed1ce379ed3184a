//! ui::prompts
//!
//! Interactive prompts and confirmations.
//!
//! # Design
//!
//! A forced-answer mode (`--yes`, `--no`, `--default`, or
//! `--force-answer=<mode>`) resolves confirmations without touching the
//! terminal. Without one, quiet mode refuses to prompt and the caller
//! gets a clear error instead of a hung pipeline.

use std::io::{BufRead, Write};

use thiserror::Error;

use crate::ui::state::{AnswerMode, CliState, Verbosity};

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("cannot prompt in quiet mode (pass --yes, --no, or --default)")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

/// Prompt for confirmation (yes/no).
///
/// A forced-answer mode short-circuits: `Yes` confirms, `No` declines,
/// `Default` takes `default`. Otherwise one line is read from stdin;
/// an empty answer takes `default`, anything starting with `y` or `n`
/// decides, and any other answer falls back to `default`.
///
/// # Errors
///
/// Returns [`PromptError::NotInteractive`] in quiet mode with no forced
/// answer, and [`PromptError::Cancelled`] on end of input.
pub fn confirm(message: &str, default: bool, state: &CliState) -> Result<bool, PromptError> {
    match state.answer() {
        AnswerMode::Yes => return Ok(true),
        AnswerMode::No => return Ok(false),
        AnswerMode::Default => return Ok(default),
        AnswerMode::None => {}
    }

    if state.verbosity() == Verbosity::Quiet {
        return Err(PromptError::NotInteractive);
    }

    let hint = if default { "[Y/n]" } else { "[y/N]" };
    print!("{} {} ", message, hint);
    std::io::stdout()
        .flush()
        .map_err(|e| PromptError::IoError(e.to_string()))?;

    let mut line = String::new();
    let read = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| PromptError::IoError(e.to_string()))?;
    if read == 0 {
        return Err(PromptError::Cancelled);
    }

    Ok(interpret_answer(&line, default))
}

fn interpret_answer(line: &str, default: bool) -> bool {
    match line.trim().chars().next() {
        Some('y') | Some('Y') => true,
        Some('n') | Some('N') => false,
        _ => default,
    }
}
