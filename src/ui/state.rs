//! ui::state
//!
//! Process-wide display settings.
//!
//! # Design
//!
//! Verbosity, color, and the forced-answer mode are read by the display
//! layer at arbitrary points and written only by the command-line
//! interpreter while it handles flags. There is no hidden global: one
//! [`CliState`] is created at startup and passed by reference, which
//! keeps tests isolated while matching the one-instance-per-run reality.

/// Output verbosity level.
///
/// Ordered from chattiest to quietest, so `<=` reads as "at least this
/// verbose": `state.verbosity() <= Verbosity::Verbose` is true in both
/// verbose and debug mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Debug mode - everything, including diagnostics
    Debug,
    /// Verbose mode - extra detail
    Verbose,
    /// Normal mode - standard output
    #[default]
    Normal,
    /// Quiet mode - minimal output
    Quiet,
}

/// Forced answer for interactive confirmations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerMode {
    /// Prompt normally.
    #[default]
    None,
    /// Answer every confirmation with yes.
    Yes,
    /// Answer every confirmation with no.
    No,
    /// Accept every confirmation's default.
    Default,
}

impl AnswerMode {
    /// Parse a `--force-answer` value.
    ///
    /// Accepts `none`, `yes`, `no`, and `default`, case insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "none" => Some(AnswerMode::None),
            "yes" => Some(AnswerMode::Yes),
            "no" => Some(AnswerMode::No),
            "default" => Some(AnswerMode::Default),
            _ => None,
        }
    }
}

/// Mutable display settings for one tool invocation.
#[derive(Debug, Clone, Default)]
pub struct CliState {
    verbosity: Verbosity,
    color: Option<bool>,
    answer: AnswerMode,
}

impl CliState {
    /// Create a state with default settings: normal verbosity, color on,
    /// no forced answer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current verbosity level.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Set the verbosity level.
    pub fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.verbosity = verbosity;
    }

    /// Whether colored output is enabled.
    pub fn color(&self) -> bool {
        self.color.unwrap_or(true)
    }

    /// Enable or disable colored output.
    pub fn set_color(&mut self, color: bool) {
        self.color = Some(color);
    }

    /// Current forced-answer mode.
    pub fn answer(&self) -> AnswerMode {
        self.answer
    }

    /// Set the forced-answer mode.
    pub fn set_answer(&mut self, answer: AnswerMode) {
        self.answer = answer;
    }
}
