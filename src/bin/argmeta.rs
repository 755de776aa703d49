// src/bin/argmeta.rs

use argmeta::cli::{self, Cli};
use clap::Parser;
use colored::*;

/// Entry point of the `argmeta` binary: renders the usage text of a definition
/// file, or a single command's description with `--describe`.
fn main() {
    env_logger::init();

    match cli::run(&Cli::parse()) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("\n{}: {:#}", "Error".red().bold(), e);
            std::process::exit(1);
        }
    }
}
