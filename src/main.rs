//! Line-oriented front-end (default binary).
//!
//! Reads the board size and then one command per line from stdin, printing
//! the board after every command. See `dr_mario::session` for the command set.

use std::io::{self, IsTerminal};

use anyhow::Result;

use dr_mario::config::SessionConfig;
use dr_mario::session;

fn main() -> Result<()> {
    let config = SessionConfig::from_env();
    let stdin = io::stdin();
    let prompts = config.prompts_enabled(stdin.is_terminal());

    session::run(stdin.lock(), io::stdout().lock(), io::stderr(), &config, prompts)?;
    Ok(())
}
