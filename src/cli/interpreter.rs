//! cli::interpreter
//!
//! Command-line tokenizer and state machine.
//!
//! # Overview
//!
//! Arguments are scanned left to right. Each token is a long option
//! (`--name`, `--name=value`, or `--name value`), a short option (`-x`,
//! with the same `=` handling), or a positional argument. The literal
//! tokens `-` and `--` are positionals.
//!
//! The first positional is matched against the command table; a match
//! sets `command` and switches positional routing to that command's
//! grammar, a miss sets `help`. Global flags always apply and are the
//! only writers of [`CliState`]. Command flags apply per the grammar.
//! Everything else passes through into the table under its own name, so
//! user-defined aliases are data rather than errors.
//!
//! # Failure
//!
//! Only a malformed flag value raises ([`ParseError`]). Unknown
//! commands, excess positionals, and unrecognized flags never do; they
//! either set `help` or pass through.

use thiserror::Error;

use crate::cli::grammar::{self, CommandSpec, FlagAction, Positionals, UnknownFlags};
use crate::core::options::{normalize_key, parse_bool, OptionsTable};
use crate::ui::state::{AnswerMode, CliState, Verbosity};

/// Errors from argument interpretation.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid boolean value '{value}' for --{flag}")]
    InvalidBool { flag: String, value: String },

    #[error("invalid --force-answer value '{value}' (expected none, yes, no, or default)")]
    InvalidAnswer { value: String },
}

/// Interpret arguments into a table and display state.
///
/// Convenience wrapper over [`Interpreter`] for the common one-shot
/// case. `args` should not include the program name.
pub fn interpret<I>(
    table: &mut OptionsTable,
    state: &mut CliState,
    args: I,
) -> Result<(), ParseError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Interpreter::new(table, state).interpret(args)
}

/// One interpretation pass over an argument list.
///
/// Holds the current command between tokens; exactly one pass runs per
/// tool invocation.
pub struct Interpreter<'a> {
    table: &'a mut OptionsTable,
    state: &'a mut CliState,
    command: Option<&'static CommandSpec>,
}

impl<'a> Interpreter<'a> {
    pub fn new(table: &'a mut OptionsTable, state: &'a mut CliState) -> Self {
        Self {
            table,
            state,
            command: None,
        }
    }

    /// Scan and apply an argument list.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for a malformed boolean or enumerated flag
    /// value. The table keeps whatever was applied before the failing
    /// token; callers abort on error, so the partial state is never used.
    pub fn interpret<I>(&mut self, args: I) -> Result<(), ParseError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let tokens: Vec<String> = args.into_iter().map(|t| t.as_ref().to_string()).collect();
        let mut index = 0;

        while index < tokens.len() {
            let token = &tokens[index];
            index += 1;

            if token == "-" || token == "--" {
                self.positional(token);
                continue;
            }

            let stripped = if let Some(long) = token.strip_prefix("--") {
                long
            } else if let Some(short) = token.strip_prefix('-') {
                short
            } else {
                self.positional(token);
                continue;
            };

            let (name, attached) = match stripped.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (stripped, None),
            };
            let name = normalize_key(name);

            // Without an attached value, a value-taking flag consumes the
            // next token unless it looks like another flag.
            let mut value = attached;
            if value.is_none() && grammar::flag_takes_value(self.command, &name) {
                if let Some(next) = tokens.get(index) {
                    if !next.starts_with('-') {
                        value = Some(next.clone());
                        index += 1;
                    }
                }
            }

            self.flag(&name, value)?;
        }

        Ok(())
    }

    /// Route one positional argument.
    fn positional(&mut self, token: &str) {
        match self.command {
            // Until a command is set, every positional is a detection
            // attempt: a known name becomes the command, anything else
            // asks for help.
            None => {
                if let Some(spec) = grammar::find(token) {
                    self.table.set("command", token);
                    self.command = Some(spec);
                } else {
                    self.table.set("help", "true");
                }
            }
            Some(spec) => match spec.positionals {
                Positionals::Slots(slots) => self.table.fill_slot_or_help(slots, token),
                Positionals::List(key) => self.append(key, token),
            },
        }
    }

    /// Append to a `;`-joined list value.
    fn append(&mut self, key: &str, value: &str) {
        let joined = match self.table.get(key) {
            Ok(existing) => format!("{};{}", existing, value),
            Err(_) => value.to_string(),
        };
        self.table.set(key, &joined);
    }

    /// Apply one flag. `name` is normalized; `value` is the attached or
    /// consumed value, if any.
    fn flag(&mut self, name: &str, value: Option<String>) -> Result<(), ParseError> {
        // Global flags are recognized regardless of the current command.
        match name {
            "h" | "help" => {
                self.table.set("help", "true");
                return Ok(());
            }
            "command" => {
                // A command cannot be supplied as an option. The value was
                // consumed above so it cannot re-enter as a positional and
                // become the command after all; it is dropped here.
                self.table.set("help", "true");
                return Ok(());
            }
            "v" | "version" => {
                self.table.set("version", "true");
                return Ok(());
            }
            "color" => {
                let on = parse_flag_bool(name, value)?;
                self.state.set_color(on);
                return Ok(());
            }
            "nocolor" => {
                let off = parse_flag_bool(name, value)?;
                self.state.set_color(!off);
                return Ok(());
            }
            "quiet" => {
                self.state.set_verbosity(Verbosity::Quiet);
                return Ok(());
            }
            "verbose" => {
                self.state.set_verbosity(Verbosity::Verbose);
                return Ok(());
            }
            "debug" => {
                self.state.set_verbosity(Verbosity::Debug);
                return Ok(());
            }
            "y" | "yes" => {
                self.state.set_answer(AnswerMode::Yes);
                return Ok(());
            }
            "n" | "no" => {
                self.state.set_answer(AnswerMode::No);
                return Ok(());
            }
            "default" => {
                self.state.set_answer(AnswerMode::Default);
                return Ok(());
            }
            "forceanswer" => {
                let raw = value.unwrap_or_default();
                let mode = AnswerMode::parse(&raw)
                    .ok_or_else(|| ParseError::InvalidAnswer { value: raw })?;
                self.state.set_answer(mode);
                return Ok(());
            }
            _ => {}
        }

        // Command-specific flags, then the command's unknown-flag rule.
        if let Some(spec) = self.command {
            if let Some(flag) = spec.flag(name) {
                match flag.action {
                    FlagAction::FillSlot { slot, value } => {
                        self.table.fill_slot_or_help(&[slot], value);
                    }
                    FlagAction::Set { key, value } => {
                        self.table.set(key, value);
                    }
                    FlagAction::SetValue { key } => {
                        if let Some(v) = &value {
                            self.table.set(key, v);
                        }
                    }
                    FlagAction::AppendValue { key } => {
                        if let Some(v) = &value {
                            self.append(key, v);
                        }
                    }
                }
                return Ok(());
            }

            if matches!(spec.unknown, UnknownFlags::RecordPair) {
                self.table.fill_slot_or_help(&["config-key"], name);
                if let Some(v) = &value {
                    self.table.fill_slot_or_help(&["config-value"], v);
                }
                return Ok(());
            }
        }

        // Passthrough: the flag's own name becomes the key. No value
        // stores the empty string, which reads back as boolean true.
        self.table.set(name, value.as_deref().unwrap_or(""));
        Ok(())
    }
}

fn parse_flag_bool(flag: &str, value: Option<String>) -> Result<bool, ParseError> {
    let raw = value.unwrap_or_default();
    parse_bool(&raw).ok_or_else(|| ParseError::InvalidBool {
        flag: flag.to_string(),
        value: raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> (OptionsTable, CliState) {
        let mut table = OptionsTable::new();
        let mut state = CliState::new();
        interpret(&mut table, &mut state, args).unwrap();
        (table, state)
    }

    fn run_err(args: &[&str]) -> ParseError {
        let mut table = OptionsTable::new();
        let mut state = CliState::new();
        interpret(&mut table, &mut state, args).unwrap_err()
    }

    #[test]
    fn known_command_detected() {
        let (table, _) = run(&["init"]);
        assert_eq!(table.get("command").unwrap(), "init");
        assert!(!table.contains("help"));
    }

    #[test]
    fn unknown_command_asks_for_help() {
        let (table, _) = run(&["foo"]);
        assert!(table.get_or("help", false));
        assert!(!table.contains("command"));
    }

    #[test]
    fn detection_repeats_until_a_command_matches() {
        let (table, _) = run(&["bogus", "init", "dir"]);
        assert!(table.get_or("help", false));
        assert_eq!(table.get("command").unwrap(), "init");
        assert_eq!(table.get("directory").unwrap(), "dir");
    }

    #[test]
    fn fixed_slots_fill_in_order() {
        let (table, _) = run(&["init", "a", "b"]);
        assert_eq!(table.get("directory").unwrap(), "a");
        assert_eq!(table.get("file").unwrap(), "b");
        assert!(!table.contains("help"));
    }

    #[test]
    fn slot_overflow_asks_for_help() {
        let (table, _) = run(&["init", "a", "b", "c"]);
        assert_eq!(table.get("directory").unwrap(), "a");
        assert_eq!(table.get("file").unwrap(), "b");
        assert!(table.get_or("help", false));
    }

    #[test]
    fn slot_filled_by_earlier_source_counts() {
        let mut table = OptionsTable::new();
        table.set("directory", "from-config");
        let mut state = CliState::new();
        interpret(&mut table, &mut state, ["init", "x"]).unwrap();
        assert_eq!(table.get("directory").unwrap(), "from-config");
        assert_eq!(table.get("file").unwrap(), "x");
    }

    #[test]
    fn growable_slot_joins_with_semicolons() {
        let (table, _) = run(&["pack", "a", "b"]);
        assert_eq!(table.get("targets").unwrap(), "a;b");
        assert!(!table.contains("help"));

        let (table, _) = run(&["convert", "x"]);
        assert_eq!(table.get("targets").unwrap(), "x");
    }

    #[test]
    fn command_flag_is_always_rejected() {
        for args in [
            &["--command=init"][..],
            &["--command", "init"][..],
            &["init", "--command=pack"][..],
        ] {
            let mut table = OptionsTable::new();
            let mut state = CliState::new();
            interpret(&mut table, &mut state, args).unwrap();
            assert!(table.get_or("help", false), "args: {args:?}");
        }

        // The next-token value is consumed and dropped, never detected.
        let (table, _) = run(&["--command", "init"]);
        assert!(!table.contains("command"));
    }

    #[test]
    fn help_and_version_flags() {
        let (table, _) = run(&["-h"]);
        assert!(table.get_or("help", false));

        let (table, _) = run(&["--version"]);
        assert!(table.get_or("version", false));

        let (table, _) = run(&["-v"]);
        assert!(table.get_or("version", false));
    }

    #[test]
    fn verbosity_flags_mutate_state() {
        let (_, state) = run(&["--quiet"]);
        assert_eq!(state.verbosity(), Verbosity::Quiet);

        let (_, state) = run(&["--verbose"]);
        assert_eq!(state.verbosity(), Verbosity::Verbose);

        let (_, state) = run(&["--debug"]);
        assert_eq!(state.verbosity(), Verbosity::Debug);

        // Last one wins.
        let (_, state) = run(&["--quiet", "--debug"]);
        assert_eq!(state.verbosity(), Verbosity::Debug);
    }

    #[test]
    fn answer_flags_mutate_state() {
        let (_, state) = run(&["-y"]);
        assert_eq!(state.answer(), AnswerMode::Yes);

        let (_, state) = run(&["--no"]);
        assert_eq!(state.answer(), AnswerMode::No);

        let (_, state) = run(&["--default"]);
        assert_eq!(state.answer(), AnswerMode::Default);

        let (_, state) = run(&["--force-answer=YES"]);
        assert_eq!(state.answer(), AnswerMode::Yes);

        let (_, state) = run(&["--force-answer", "no"]);
        assert_eq!(state.answer(), AnswerMode::No);
    }

    #[test]
    fn bad_force_answer_value_is_an_error() {
        let err = run_err(&["--force-answer=bogus"]);
        assert!(matches!(err, ParseError::InvalidAnswer { .. }));

        // Missing value is just as malformed.
        let err = run_err(&["--force-answer"]);
        assert!(matches!(err, ParseError::InvalidAnswer { .. }));
    }

    #[test]
    fn color_flags_mutate_state() {
        let (_, state) = run(&["--color"]);
        assert!(state.color());

        let (_, state) = run(&["--no-color"]);
        assert!(!state.color());

        let (_, state) = run(&["--color=off"]);
        assert!(!state.color());

        let (_, state) = run(&["--no-color=false"]);
        assert!(state.color());
    }

    #[test]
    fn color_does_not_consume_the_next_token() {
        let (table, state) = run(&["--color", "false"]);
        assert!(state.color());
        // "false" fell through to command detection.
        assert!(table.get_or("help", false));
    }

    #[test]
    fn bad_color_value_is_an_error() {
        let err = run_err(&["--color=notabool"]);
        match err {
            ParseError::InvalidBool { flag, value } => {
                assert_eq!(flag, "color");
                assert_eq!(value, "notabool");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = run_err(&["--no-color=7up"]);
        assert!(matches!(err, ParseError::InvalidBool { .. }));
    }

    #[test]
    fn config_operation_flags_fill_the_op_slot() {
        let (table, _) = run(&["config", "-g", "emulator"]);
        assert_eq!(table.get("config-op").unwrap(), "get");
        assert_eq!(table.get("config-key").unwrap(), "emulator");

        let (table, _) = run(&["config", "--set", "emulator", "mesen"]);
        assert_eq!(table.get("config-op").unwrap(), "set");
        assert_eq!(table.get("config-key").unwrap(), "emulator");
        assert_eq!(table.get("config-value").unwrap(), "mesen");
    }

    #[test]
    fn repeated_config_operation_asks_for_help() {
        let (table, _) = run(&["config", "-g", "-s"]);
        assert_eq!(table.get("config-op").unwrap(), "get");
        assert!(table.get_or("help", false));
    }

    #[test]
    fn config_scope_flags_overwrite() {
        let (table, _) = run(&["config", "--local", "--global"]);
        assert_eq!(table.get("config-scope").unwrap(), "global");
    }

    #[test]
    fn config_directory_flag_takes_a_value() {
        let (table, _) = run(&["config", "-d", "proj"]);
        assert_eq!(table.get("directory").unwrap(), "proj");

        let (table, _) = run(&["config", "--dir=proj"]);
        assert_eq!(table.get("directory").unwrap(), "proj");
    }

    #[test]
    fn config_unknown_flag_records_a_pair() {
        let (table, _) = run(&["config", "--alias", "roms/"]);
        assert_eq!(table.get("config-key").unwrap(), "alias");
        assert_eq!(table.get("config-value").unwrap(), "roms/");
        assert!(!table.contains("help"));

        // Without a value only the key is recorded.
        let (table, _) = run(&["config", "--alias"]);
        assert_eq!(table.get("config-key").unwrap(), "alias");
        assert!(!table.contains("config-value"));
    }

    #[test]
    fn config_pair_overflow_asks_for_help() {
        let (table, _) = run(&["config", "somekey", "--alias", "roms/"]);
        assert_eq!(table.get("config-key").unwrap(), "somekey");
        assert!(table.get_or("help", false));
    }

    #[test]
    fn compile_file_flag_accumulates() {
        let (table, _) = run(&["compile", "-f", "a.s", "-f", "b.s"]);
        assert_eq!(table.get("files").unwrap(), "a.s;b.s");

        // A bare -f is a no-op.
        let (table, _) = run(&["compile", "-f"]);
        assert!(!table.contains("files"));
    }

    #[test]
    fn compile_mixes_targets_and_files() {
        let (table, _) = run(&["compile", "game", "-f", "extra.s", "demo"]);
        assert_eq!(table.get("targets").unwrap(), "game;demo");
        assert_eq!(table.get("files").unwrap(), "extra.s");
    }

    #[test]
    fn unrecognized_flags_pass_through() {
        let (table, _) = run(&["play", "--turbo"]);
        assert_eq!(table.get("turbo").unwrap(), "");
        assert!(table.get_or("turbo", false));

        let (table, _) = run(&["play", "--map-dir", "maps/"]);
        assert_eq!(table.get("mapdir").unwrap(), "maps/");

        let (table, _) = run(&["play", "--speed=2"]);
        assert_eq!(table.get_or("speed", 0), 2);
    }

    #[test]
    fn passthrough_before_any_command_consumes_values() {
        // A value-taking passthrough flag swallows the next token, so no
        // command is detected here.
        let (table, _) = run(&["--fast", "init"]);
        assert_eq!(table.get("fast").unwrap(), "init");
        assert!(!table.contains("command"));
    }

    #[test]
    fn value_not_consumed_when_next_token_is_a_flag() {
        let (table, _) = run(&["play", "--speed", "--turbo"]);
        assert_eq!(table.get("speed").unwrap(), "");
        assert_eq!(table.get("turbo").unwrap(), "");
    }

    #[test]
    fn config_flags_never_swallow_tokens_under_other_commands() {
        // The valueless list applies whatever the command is, so the
        // next token stays positional and the flag passes through bare.
        let (table, _) = run(&["play", "--list", "game"]);
        assert_eq!(table.get("list").unwrap(), "");
        assert_eq!(table.get("targets").unwrap(), "game");

        // Before any command, --get cannot eat the command name either.
        let (table, _) = run(&["--get", "config", "somekey"]);
        assert_eq!(table.get("get").unwrap(), "");
        assert_eq!(table.get("command").unwrap(), "config");
        assert_eq!(table.get("config-key").unwrap(), "somekey");
    }

    #[test]
    fn short_flags_split_on_equals() {
        let (table, _) = run(&["config", "-d=proj"]);
        assert_eq!(table.get("directory").unwrap(), "proj");
    }

    #[test]
    fn dash_tokens_are_positionals() {
        let (table, _) = run(&["list", "-"]);
        assert_eq!(table.get("target").unwrap(), "-");

        let (table, _) = run(&["--"]);
        assert!(table.get_or("help", false));
        assert!(!table.contains("command"));
    }

    #[test]
    fn flag_spellings_normalize() {
        let (_, state) = run(&["--No_Color"]);
        assert!(!state.color());

        let (table, _) = run(&["config", "--UN_SET", "key"]);
        assert_eq!(table.get("config-op").unwrap(), "unset");
    }
}
