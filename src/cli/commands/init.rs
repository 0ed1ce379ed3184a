//! init command - Create a cartridge project

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::core::options::OptionsTable;
use crate::core::paths;
use crate::ui::output;
use crate::ui::prompts;
use crate::ui::state::CliState;

const LOCAL_CONFIG_HEADER: &str = "\
# cartwright project options
# One `key = value` per line; a bare key means true.
";

/// Create a cartridge project.
///
/// The target directory comes from the `directory` slot (default `.`)
/// and the optional main source file from the `file` slot. The project
/// marker and a local config skeleton are written so the config cascade
/// can find the project afterwards. An existing marker is only replaced
/// after confirmation.
pub fn run(table: &OptionsTable, state: &CliState) -> Result<()> {
    let dir = PathBuf::from(table.get_or("directory", String::from(".")));
    let marker = dir.join(paths::PROJECT_MARKER);

    if marker.exists() {
        let overwrite = prompts::confirm(
            &format!("'{}' already exists. Overwrite it?", marker.display()),
            false,
            state,
        )?;
        if !overwrite {
            output::print("Leaving the existing project untouched.", state);
            return Ok(());
        }
    }

    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory '{}'", dir.display()))?;

    let name = project_name(&dir);
    fs::write(&marker, manifest(&name, table.get("file").ok()))
        .with_context(|| format!("failed to write '{}'", marker.display()))?;

    let local_cfg = paths::local_config_path(&dir);
    if !local_cfg.exists() {
        if let Some(parent) = local_cfg.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory '{}'", parent.display()))?;
        }
        fs::write(&local_cfg, LOCAL_CONFIG_HEADER)
            .with_context(|| format!("failed to write '{}'", local_cfg.display()))?;
    }

    output::success(
        format!("Created cartridge project '{}' in {}", name, dir.display()),
        state,
    );
    output::detail(format!("Manifest: {}", marker.display()), state);
    Ok(())
}

/// Derive the project name from the target directory.
fn project_name(dir: &Path) -> String {
    let resolved = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("cartridge"))
}

fn manifest(name: &str, main: Option<&str>) -> String {
    let mut text = String::new();
    text.push_str("# Cartridge project manifest.\n");
    text.push_str("[cartridge]\n");
    text.push_str(&format!("name = \"{}\"\n", name));
    if let Some(main) = main {
        text.push_str(&format!("main = \"{}\"\n", main));
    }
    text
}
