//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Reads its inputs from the resolved [`OptionsTable`]
//! 2. Performs the work (or hands off to the pipeline backend)
//! 3. Formats and displays output through [`crate::ui::output`]
//!
//! Handlers never look at raw argv. By the time dispatch runs, every
//! source has been folded into the table, so `dispatch` only needs the
//! table and the session state.

pub mod config_cmd;
pub mod init;
pub mod pipeline;

use anyhow::Result;

use crate::cli::usage;
use crate::core::options::OptionsTable;
use crate::ui::state::CliState;

/// Route a resolved invocation to its handler.
///
/// Help and version outrank everything else: any parse that requested
/// them prints and succeeds, no matter what else the table holds. An
/// invocation that never named a command gets the usage text too.
pub fn dispatch(table: &OptionsTable, state: &CliState) -> Result<()> {
    if table.get_or("help", false) {
        usage::print_usage();
        return Ok(());
    }
    if table.get_or("version", false) {
        println!("{}", usage::version());
        return Ok(());
    }
    match table.get("command") {
        Err(_) => {
            usage::print_usage();
            Ok(())
        }
        Ok("init") => init::run(table, state),
        Ok("config") => config_cmd::run(table, state),
        Ok(other) => pipeline::run(other, table, state),
    }
}
