//! cw - Cartwright binary entry point.

use std::process;

use cartwright::cli;
use cartwright::core::options::OptionsTable;
use cartwright::ui::output;
use cartwright::ui::state::CliState;

fn main() {
    let mut table = OptionsTable::from_pairs(cli::DEFAULT_OPTIONS);
    let mut state = CliState::new();
    if let Err(err) = cli::run(&mut table, &mut state) {
        // `{:#}` chains the context annotations onto one line. The state
        // carries whatever flags were resolved before the failure, so
        // --no-color applies to this line too.
        output::error(format!("{:#}", err), &state);
        process::exit(1);
    }
}
