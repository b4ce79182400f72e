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
            Arg::new("project")
                .short('p')
                .long("project")
                .value_parser(value_parser!(String))
                .value_name("PROJECT[,PROJECT..]")
                .required(true)
                .help("VEuPathDB project(s) from which to download RNA sequence data, e.g., PlasmoDB or CryptoDB,ToxoDB"),
        )
        .arg(
            Arg::new("output_dir")
                .short('o')
                .long("output-dir")
                .alias("outputDir")
                .value_parser(value_parser!(PathBuf))
                .value_name("PATH")
                .required(true)
                .help("Directory for output files"),
        )
}

/// Handle command line options.  Set up Config structure
pub fn handle_cli() -> anyhow::Result<Config> {
    // Get matches from command line
    let m = cli_model().get_matches();

    // Setup logging
    init_log(&m)?;

    debug!("Processing command line options");

    let projects = parse_project_list(
        m.get_one::<String>("project")
            .expect("Missing project list"),
    );
    if projects.is_empty() {
        return Err(anyhow!("No projects given"));
    }
    debug!("Projects: {:?}", projects);

    let output_dir = m
        .get_one::<PathBuf>("output_dir")
        .expect("Missing output directory")
        .to_owned();

    Ok(Config::new(projects, output_dir))
}
