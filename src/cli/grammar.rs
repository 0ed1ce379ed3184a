//! cli::grammar
//!
//! Per-command argument grammar.
//!
//! # Design
//!
//! Each command is described by a static [`CommandSpec`]: its positional
//! shape (fixed named slots, or one growable list), its own flags with
//! their actions, and what to do with flags it does not recognize. The
//! interpreter never branches on command names; adding a command means
//! adding a row here.
//!
//! Flag names are stored in normalized form (the interpreter normalizes
//! spellings before lookup), so `--no_color` and `--nocolor` hit the
//! same entry.

/// Positional-argument shape of a command.
#[derive(Debug, Clone, Copy)]
pub enum Positionals {
    /// Named slots filled left to right; overflow sets `help`.
    Slots(&'static [&'static str]),
    /// One growable slot accumulating a `;`-joined list.
    List(&'static str),
}

/// What a recognized command flag does to the options table.
#[derive(Debug, Clone, Copy)]
pub enum FlagAction {
    /// Fill `slot` with `value` if unset, else set `help`.
    FillSlot {
        slot: &'static str,
        value: &'static str,
    },
    /// Set `key` to `value`, overwriting.
    Set {
        key: &'static str,
        value: &'static str,
    },
    /// Set `key` to the flag's value; without a value, do nothing.
    SetValue { key: &'static str },
    /// Append the flag's value to the `;`-joined list under `key`.
    AppendValue { key: &'static str },
}

/// One command-specific flag.
#[derive(Debug)]
pub struct FlagSpec {
    /// Normalized spellings that select this flag.
    pub names: &'static [&'static str],
    /// Whether a following token may be consumed as the value.
    pub takes_value: bool,
    /// Effect on the options table.
    pub action: FlagAction,
}

/// Treatment of flags no rule recognizes.
#[derive(Debug, Clone, Copy)]
pub enum UnknownFlags {
    /// Store under the flag's own name (user-defined aliases pass through).
    Store,
    /// Record as a `config-key`/`config-value` pair.
    RecordPair,
}

/// Static description of one command.
#[derive(Debug)]
pub struct CommandSpec {
    pub name: &'static str,
    pub about: &'static str,
    pub positionals: Positionals,
    pub flags: &'static [FlagSpec],
    pub unknown: UnknownFlags,
}

impl CommandSpec {
    /// Look up a command-specific flag by normalized name.
    pub fn flag(&self, name: &str) -> Option<&'static FlagSpec> {
        self.flags.iter().find(|spec| spec.names.contains(&name))
    }
}

/// Flag names that never consume a following token as a value.
///
/// One fixed list, consulted during tokenization whatever the current
/// command is: the config operation and scope flags keep their hands
/// off the next token even under another command, where they fall
/// through to passthrough storage. `--command` and `--force-answer`
/// do take values, so they are absent here.
const VALUELESS: &[&str] = &[
    "h", "help", "v", "version", "color", "nocolor", "debug", "verbose", "quiet", "y", "yes", "n",
    "no", "default", "g", "get", "s", "set", "u", "unset", "l", "list", "global", "local",
];

/// The single source of truth for all commands.
pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "init",
        about: "Create a cartridge project",
        positionals: Positionals::Slots(&["directory", "file"]),
        flags: &[],
        unknown: UnknownFlags::Store,
    },
    CommandSpec {
        name: "config",
        about: "Read and edit tool configuration",
        positionals: Positionals::Slots(&["config-key", "config-value"]),
        flags: &[
            FlagSpec {
                names: &["g", "get"],
                takes_value: false,
                action: FlagAction::FillSlot {
                    slot: "config-op",
                    value: "get",
                },
            },
            FlagSpec {
                names: &["s", "set"],
                takes_value: false,
                action: FlagAction::FillSlot {
                    slot: "config-op",
                    value: "set",
                },
            },
            FlagSpec {
                names: &["u", "unset"],
                takes_value: false,
                action: FlagAction::FillSlot {
                    slot: "config-op",
                    value: "unset",
                },
            },
            FlagSpec {
                names: &["l", "list"],
                takes_value: false,
                action: FlagAction::FillSlot {
                    slot: "config-op",
                    value: "list",
                },
            },
            FlagSpec {
                names: &["global"],
                takes_value: false,
                action: FlagAction::Set {
                    key: "config-scope",
                    value: "global",
                },
            },
            FlagSpec {
                names: &["local"],
                takes_value: false,
                action: FlagAction::Set {
                    key: "config-scope",
                    value: "local",
                },
            },
            FlagSpec {
                names: &["d", "dir", "directory"],
                takes_value: true,
                action: FlagAction::SetValue { key: "directory" },
            },
        ],
        unknown: UnknownFlags::RecordPair,
    },
    CommandSpec {
        name: "list",
        about: "List the contents of a cartridge or build",
        positionals: Positionals::Slots(&["target"]),
        flags: &[],
        unknown: UnknownFlags::Store,
    },
    CommandSpec {
        name: "unpack",
        about: "Extract assets from a cartridge",
        positionals: Positionals::Slots(&["target", "file"]),
        flags: &[],
        unknown: UnknownFlags::Store,
    },
    CommandSpec {
        name: "convert",
        about: "Convert source assets into cartridge formats",
        positionals: Positionals::List("targets"),
        flags: &[],
        unknown: UnknownFlags::Store,
    },
    CommandSpec {
        name: "compile",
        about: "Compile sources into a playable build",
        positionals: Positionals::List("targets"),
        flags: &[FlagSpec {
            names: &["f", "file"],
            takes_value: true,
            action: FlagAction::AppendValue { key: "files" },
        }],
        unknown: UnknownFlags::Store,
    },
    CommandSpec {
        name: "pack",
        about: "Pack built assets into a cartridge",
        positionals: Positionals::List("targets"),
        flags: &[],
        unknown: UnknownFlags::Store,
    },
    CommandSpec {
        name: "install",
        about: "Install a cartridge onto a connected device",
        positionals: Positionals::List("targets"),
        flags: &[],
        unknown: UnknownFlags::Store,
    },
    CommandSpec {
        name: "play",
        about: "Run a cartridge in the configured emulator",
        positionals: Positionals::List("targets"),
        flags: &[],
        unknown: UnknownFlags::Store,
    },
    CommandSpec {
        name: "test",
        about: "Run a cartridge's test table",
        positionals: Positionals::List("targets"),
        flags: &[],
        unknown: UnknownFlags::Store,
    },
    CommandSpec {
        name: "serve",
        about: "Serve a build over HTTP for browser play",
        positionals: Positionals::List("targets"),
        flags: &[],
        unknown: UnknownFlags::Store,
    },
];

/// Find a command spec by exact name.
pub fn find(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|cmd| cmd.name == name)
}

/// Whether a flag may consume the next token as its value.
///
/// Names in the fixed valueless list never do. Otherwise the current
/// command's own flag table decides; every remaining flag, including
/// passthrough flags no rule recognizes, takes a value.
pub fn flag_takes_value(command: Option<&CommandSpec>, name: &str) -> bool {
    if VALUELESS.contains(&name) {
        return false;
    }
    if let Some(cmd) = command {
        if let Some(spec) = cmd.flag(name) {
            return spec.takes_value;
        }
    }
    true
}
