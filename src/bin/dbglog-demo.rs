#![deny(unsafe_code)]

//! Replays the demo host application's log calls through the leveled
//! console logger. See `cli` for the supported switches.

use std::{env, process::ExitCode};

fn main() -> ExitCode {
    cli::exit_code_from(cli::run_stdio(env::args_os()))
}
