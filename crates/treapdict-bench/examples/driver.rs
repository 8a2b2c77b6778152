//! Demonstration driver: several dictionaries on one shared arena.
//!
//! Usage: `cargo run --example driver -- -d4 -e4096 -s0`
//!
//! `-d<N>` sets the dictionary count, `-e<N>` the entries per dictionary
//! and `-s<N>` the seed. Exits non-zero if any check fails.

use std::io;
use std::process::ExitCode;

use treapdict_bench::driver::{run, DriverConfig};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match DriverConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("driver: {e}");
            return ExitCode::from(2);
        }
    };

    let stdout = io::stdout();
    match run(&config, &mut stdout.lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("driver: failed to write report: {e}");
            ExitCode::FAILURE
        }
    }
}
