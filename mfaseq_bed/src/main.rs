mod cli;
mod config;
mod io;
mod output;
mod process;
mod ratio;
mod windows;

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let cfg = cli::handle_cli().with_context(|| "Error processing command line arguments")?;
    process::process_files(&cfg)
}
