//! pipeline commands - Seam to the cartridge build backend
//!
//! `list`, `unpack`, `convert`, `compile`, `pack`, `install`, `play`,
//! `test`, and `serve` all hand their resolved options to the asset
//! pipeline. The pipeline itself is a separate backend; this build
//! resolves the invocation, reports it in debug mode, and fails with a
//! clear message instead of running it.

use anyhow::{bail, Result};

use crate::core::options::OptionsTable;
use crate::ui::output;
use crate::ui::state::CliState;

/// Split a `;`-joined list value into its parts.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(';')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Hand a pipeline command to the backend.
///
/// Reads every input through default-bearing accessors; no key is
/// assumed present. This is the whole option contract the backend sees.
pub fn run(command: &str, table: &OptionsTable, state: &CliState) -> Result<()> {
    let targets = split_list(&table.get_or("targets", String::new()));
    let files = split_list(&table.get_or("files", String::new()));
    let target = table.get_or("target", String::new());
    let out_dir = table.get_or("out-dir", String::from("build"));

    let mut invocation = format!("{}: out-dir '{}'", command, out_dir);
    if !target.is_empty() {
        invocation.push_str(&format!(", target '{}'", target));
    }
    if !targets.is_empty() {
        invocation.push_str(&format!(", targets {:?}", targets));
    }
    if !files.is_empty() {
        invocation.push_str(&format!(", files {:?}", files));
    }
    match command {
        "play" | "install" | "test" => {
            let emulator = table.get_or("emulator", String::from("auto"));
            invocation.push_str(&format!(", emulator '{}'", emulator));
        }
        "serve" => {
            let port = table.get_or("serve-port", 8080);
            invocation.push_str(&format!(", port {}", port));
        }
        _ => {}
    }
    output::debug(invocation, state);

    bail!(
        "the {} command needs the cartridge pipeline backend, which is not part of this build",
        command
    );
}
