use std::path::PathBuf;

use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_parser, Arg, Command,
};

use utils::{init_log, log_args};

use crate::config::*;

/// Set up definition of command options for clap
fn cli_model() -> Command {
    Command::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .author(crate_authors!())
        .args(log_args("info"))
        .arg(
            Arg::new("fasta_file")
                .short('f')
                .long("fasta-file")
                .alias("fastaFile")
                .value_parser(value_parser!(PathBuf))
                .value_name("PATH")
                .required(true)
                .help("Input fasta file"),
        )
        .arg(
            Arg::new("mapping_file")
                .short('m')
                .long("mapping-file")
                .alias("mappingFile")
                .value_parser(value_parser!(PathBuf))
                .value_name("PATH")
                .required(true)
                .help("Comma separated file containing record ids from the fasta file and their replacements"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("out")
                .value_parser(value_parser!(PathBuf))
                .value_name("PATH")
                .help("Set output file [default: renamed_<FASTA_FILE>]"),
        )
}

/// Handle command line options.  Set up Config structure
pub fn handle_cli() -> anyhow::Result<Config> {
    // Get matches from command line
    let m = cli_model().get_matches();

    // Setup logging
    init_log(&m)?;

    debug!("Processing command line options");

    Ok(Config::new(
        m.get_one::<PathBuf>("fasta_file")
            .expect("Missing fasta file")
            .to_owned(),
        m.get_one::<PathBuf>("mapping_file")
            .expect("Missing mapping file")
            .to_owned(),
        m.get_one::<PathBuf>("output").map(|p| p.to_owned()),
    ))
}
