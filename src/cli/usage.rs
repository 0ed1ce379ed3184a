//! cli::usage
//!
//! Usage and version text.

use std::fmt::Write as _;

use crate::cli::grammar::{self, Positionals};

const OPTIONS_HELP: &str = r#"
Global options:
  -h, --help               Show this help
  -v, --version            Show the tool version
      --color[=BOOL]       Force colored output on
      --no-color[=BOOL]    Force colored output off
      --quiet              Errors and data output only
      --verbose            Extra detail
      --debug              Diagnostic output
  -y, --yes                Answer yes to every confirmation
  -n, --no                 Answer no to every confirmation
      --default            Accept every confirmation's default
      --force-answer=MODE  One of none, yes, no, default

Config options (cw config):
  -g, --get                Read a key (the default with a key)
  -s, --set                Write a key
  -u, --unset              Remove a key
  -l, --list               Show the whole file (the default)
      --global, --local    Pick the scope explicitly
  -d, --dir DIR            Resolve the local scope from DIR

Other options are stored as options for the command, so user-defined
keys pass straight through to the pipeline.
"#;

/// Render the usage screen.
///
/// The command section is generated from the grammar table so the help
/// never drifts from what the interpreter accepts.
pub fn usage() -> String {
    let mut text = String::new();
    text.push_str("cartwright - build, pack, and run retro cartridge projects\n");
    text.push('\n');
    text.push_str("Usage: cw <command> [options] [arguments]\n");
    text.push('\n');
    text.push_str("Commands:\n");

    for cmd in grammar::COMMANDS {
        let args = match cmd.positionals {
            Positionals::Slots(slots) => slots
                .iter()
                .map(|slot| format!("[{}]", slot))
                .collect::<Vec<_>>()
                .join(" "),
            Positionals::List(name) => format!("[{}...]", name),
        };
        let _ = writeln!(text, "  {:<8} {:<28} {}", cmd.name, args, cmd.about);
    }

    text.push_str(OPTIONS_HELP);
    text
}

/// Print the usage screen to stdout.
pub fn print_usage() {
    print!("{}", usage());
}

/// Render the version line.
pub fn version() -> String {
    format!("cw {}", env!("CARGO_PKG_VERSION"))
}
