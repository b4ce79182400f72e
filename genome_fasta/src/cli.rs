use std::path::PathBuf;

use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_parser, Arg, ArgAction,
    Command,
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
            Arg::new("type")
                .short('T')
                .long("type")
                .value_parser(value_parser!(SequenceType))
                .value_name("TYPE")
                .ignore_case(true)
                .required(true)
                .help("Type of sequence to download: genomic, transcript, cds (all nucleotide) or protein (amino acid)"),
        )
        .arg(
            Arg::new("include_unannotated")
                .action(ArgAction::SetTrue)
                .long("include-unannotated")
                .alias("includeUnannotated")
                .help("For genomic sequences only, include fasta from organisms with no annotations"),
        )
        .arg(
            Arg::new("output_dir")
                .short('o')
                .long("output-dir")
                .value_parser(value_parser!(PathBuf))
                .value_name("PATH")
                .help("Set output directory [default: current directory]"),
        )
        .arg(
            Arg::new("project")
                .value_parser(value_parser!(String))
                .value_name("PROJECT")
                .required(true)
                .help("EuPathDB project from which to download fasta sequences, e.g., PlasmoDB, TriTrypDB"),
        )
}

/// Handle command line options.  Set up Config structure
pub fn handle_cli() -> anyhow::Result<Config> {
    // Get matches from command line
    let m = cli_model().get_matches();

    // Setup logging
    init_log(&m)?;

    debug!("Processing command line options");

    let project = m
        .get_one::<String>("project")
        .expect("Missing project")
        .clone();
    let seq_type = *m
        .get_one::<SequenceType>("type")
        .expect("Missing sequence type");

    let mut cfg = Config::new(project, seq_type, m.get_flag("include_unannotated"))?;

    if let Some(p) = m.get_one::<PathBuf>("output_dir") {
        cfg.set_output_dir(p.to_owned())
    }

    Ok(cfg)
}
