//! config command - Read and edit tool configuration

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context as _, Result};

use crate::core::config;
use crate::core::options::OptionsTable;
use crate::core::paths;
use crate::ui::output;
use crate::ui::state::CliState;

/// Run the config command against the resolved options.
///
/// The interpreter leaves the inputs in the table: `config-op` from the
/// operation flags, `config-key`/`config-value` from positionals or a
/// recorded flag pair, and `config-scope` from `--global`/`--local`.
/// Without an operation flag, a key means `get` and no key means `list`.
pub fn run(table: &OptionsTable, state: &CliState) -> Result<()> {
    let op = match table.get("config-op") {
        Ok(op) => op.to_string(),
        Err(_) if table.contains("config-key") => "get".to_string(),
        Err(_) => "list".to_string(),
    };

    let path = scoped_file(table)?;

    match op.as_str() {
        "get" => get(table, &path),
        "set" => set(table, state, &path),
        "unset" => unset(table, state, &path),
        "list" => list(&path),
        other => bail!("unknown config operation: {}", other),
    }
}

/// Resolve which config file the operation targets.
///
/// `--global`/`--local` pick explicitly. Without either, the local file
/// wins when a project marker is found from `--dir` or the working
/// directory, else the global file.
fn scoped_file(table: &OptionsTable) -> Result<PathBuf> {
    let start = match table.get("directory") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("failed to determine current directory")?,
    };

    let scope = table.get_or("config-scope", String::new());
    match scope.as_str() {
        "global" => global_file(),
        "local" => local_file(&start),
        _ => match paths::find_project_root(&start) {
            Some(root) => Ok(paths::local_config_path(&root)),
            None => global_file(),
        },
    }
}

fn global_file() -> Result<PathBuf> {
    paths::global_config_path()
        .ok_or_else(|| anyhow!("could not determine the global config location"))
}

fn local_file(start: &Path) -> Result<PathBuf> {
    let root = paths::find_project_root(start).ok_or_else(|| {
        anyhow!(
            "no {} found in '{}' or any parent directory",
            paths::PROJECT_MARKER,
            start.display()
        )
    })?;
    Ok(paths::local_config_path(&root))
}

fn require_key<'t>(table: &'t OptionsTable, op: &str) -> Result<&'t str> {
    match table.get("config-key") {
        Ok(key) => Ok(key),
        Err(_) => bail!("the {} operation needs a configuration key", op),
    }
}

/// Print one value. An absent key, or a scope with no file yet, prints
/// nothing and succeeds.
fn get(table: &OptionsTable, path: &Path) -> Result<()> {
    let key = require_key(table, "get")?;
    if !path.exists() {
        return Ok(());
    }

    let mut scoped = OptionsTable::new();
    config::load_file(&mut scoped, path)
        .with_context(|| format!("in config file '{}'", path.display()))?;

    if let Ok(value) = scoped.get(key) {
        println!("{}", value);
    }
    Ok(())
}

/// Write one key, preserving the file's order and other entries. A
/// missing value mirrors the bare-key file syntax: the key becomes true.
fn set(table: &OptionsTable, state: &CliState, path: &Path) -> Result<()> {
    let key = require_key(table, "set")?;
    let value = table.get_or("config-value", String::from("true"));

    let mut pairs = if path.exists() {
        config::read_pairs(path).with_context(|| format!("in config file '{}'", path.display()))?
    } else {
        Vec::new()
    };
    config::upsert_pair(&mut pairs, key, &value);
    config::save_pairs(path, &pairs)?;

    output::success(
        format!("Set {} = {} in {}", key, value, path.display()),
        state,
    );
    Ok(())
}

/// Remove one key. Removing a key that is not set succeeds.
fn unset(table: &OptionsTable, state: &CliState, path: &Path) -> Result<()> {
    let key = require_key(table, "unset")?;
    if !path.exists() {
        output::warn(format!("{} is not set in {}", key, path.display()), state);
        return Ok(());
    }

    let mut pairs =
        config::read_pairs(path).with_context(|| format!("in config file '{}'", path.display()))?;
    if config::remove_pair(&mut pairs, key) {
        config::save_pairs(path, &pairs)?;
        output::success(format!("Unset {} in {}", key, path.display()), state);
    } else {
        output::warn(format!("{} is not set in {}", key, path.display()), state);
    }
    Ok(())
}

/// Print the whole file in its own order.
fn list(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let pairs =
        config::read_pairs(path).with_context(|| format!("in config file '{}'", path.display()))?;
    for (key, value) in &pairs {
        println!("{}", config::format_line(key, value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project(temp: &TempDir) -> PathBuf {
        let dir = temp.path().join("game");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(paths::PROJECT_MARKER), "").unwrap();
        dir
    }

    fn table_for(dir: &Path, entries: &[(&str, &str)]) -> OptionsTable {
        let mut table = OptionsTable::new();
        table.set("directory", &dir.display().to_string());
        for (key, value) in entries {
            table.set(key, value);
        }
        table
    }

    #[test]
    fn default_scope_is_local_inside_a_project() {
        let temp = TempDir::new().unwrap();
        let dir = project(&temp);
        let table = table_for(&dir, &[]);
        assert_eq!(
            scoped_file(&table).unwrap(),
            dir.join(".cartwright/user.cfg")
        );
    }

    #[test]
    fn explicit_local_scope_requires_a_marker() {
        let temp = TempDir::new().unwrap();
        let table = table_for(temp.path(), &[("config-scope", "local")]);
        let err = scoped_file(&table).unwrap_err();
        assert!(err.to_string().contains(paths::PROJECT_MARKER));
    }

    #[test]
    fn set_creates_and_updates_the_file() {
        let temp = TempDir::new().unwrap();
        let dir = project(&temp);
        let state = CliState::new();

        let table = table_for(
            &dir,
            &[("config-op", "set"), ("config-key", "emulator"), ("config-value", "mesen")],
        );
        run(&table, &state).unwrap();

        let cfg = dir.join(".cartwright/user.cfg");
        assert_eq!(fs::read_to_string(&cfg).unwrap(), "emulator = mesen\n");

        // A second set for the same key rewrites in place.
        let table = table_for(
            &dir,
            &[("config-op", "set"), ("config-key", "EMULATOR"), ("config-value", "fceux")],
        );
        run(&table, &state).unwrap();
        assert_eq!(fs::read_to_string(&cfg).unwrap(), "EMULATOR = fceux\n");
    }

    #[test]
    fn set_without_a_value_stores_true() {
        let temp = TempDir::new().unwrap();
        let dir = project(&temp);
        let state = CliState::new();

        let table = table_for(&dir, &[("config-op", "set"), ("config-key", "fullscreen")]);
        run(&table, &state).unwrap();

        let cfg = dir.join(".cartwright/user.cfg");
        assert_eq!(fs::read_to_string(&cfg).unwrap(), "fullscreen = true\n");
    }

    #[test]
    fn set_preserves_unrelated_entries_and_order() {
        let temp = TempDir::new().unwrap();
        let dir = project(&temp);
        let cfg = dir.join(".cartwright/user.cfg");
        fs::create_dir_all(cfg.parent().unwrap()).unwrap();
        fs::write(&cfg, "alpha = 1\nbeta = 2\ngamma = 3\n").unwrap();

        let state = CliState::new();
        let table = table_for(
            &dir,
            &[("config-op", "set"), ("config-key", "beta"), ("config-value", "9")],
        );
        run(&table, &state).unwrap();

        assert_eq!(
            fs::read_to_string(&cfg).unwrap(),
            "alpha = 1\nbeta = 9\ngamma = 3\n"
        );
    }

    #[test]
    fn set_refuses_a_multiline_value() {
        let temp = TempDir::new().unwrap();
        let dir = project(&temp);
        let state = CliState::new();

        let table = table_for(
            &dir,
            &[("config-op", "set"), ("config-key", "alias"), ("config-value", "roms\nextra")],
        );
        let err = run(&table, &state).unwrap_err();
        assert!(err.to_string().contains("line break"));

        // Nothing was written.
        assert!(!dir.join(".cartwright/user.cfg").exists());
    }

    #[test]
    fn unset_removes_every_spelling() {
        let temp = TempDir::new().unwrap();
        let dir = project(&temp);
        let cfg = dir.join(".cartwright/user.cfg");
        fs::create_dir_all(cfg.parent().unwrap()).unwrap();
        fs::write(&cfg, "out-dir = a\nOUT_DIR = b\nkeep = 1\n").unwrap();

        let state = CliState::new();
        let table = table_for(&dir, &[("config-op", "unset"), ("config-key", "outdir")]);
        run(&table, &state).unwrap();

        assert_eq!(fs::read_to_string(&cfg).unwrap(), "keep = 1\n");
    }

    #[test]
    fn unset_of_absent_key_succeeds() {
        let temp = TempDir::new().unwrap();
        let dir = project(&temp);
        let state = CliState::new();

        let table = table_for(&dir, &[("config-op", "unset"), ("config-key", "nothing")]);
        run(&table, &state).unwrap();
    }

    #[test]
    fn get_and_set_need_a_key() {
        let temp = TempDir::new().unwrap();
        let dir = project(&temp);
        let state = CliState::new();

        for op in ["get", "set", "unset"] {
            let table = table_for(&dir, &[("config-op", op)]);
            let err = run(&table, &state).unwrap_err();
            assert!(err.to_string().contains("configuration key"), "op: {op}");
        }
    }

    #[test]
    fn default_operation_depends_on_the_key() {
        let temp = TempDir::new().unwrap();
        let dir = project(&temp);
        let state = CliState::new();

        // No op, no key: list of a missing file prints nothing, succeeds.
        let table = table_for(&dir, &[]);
        run(&table, &state).unwrap();

        // No op with a key: get of a missing file prints nothing, succeeds.
        let table = table_for(&dir, &[("config-key", "emulator")]);
        run(&table, &state).unwrap();
    }
}
