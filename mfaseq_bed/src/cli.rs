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
        .args(log_args("warn"))
        .arg(
            Arg::new("file1")
                .long("file1")
                .value_parser(value_parser!(PathBuf))
                .value_name("PATH")
                .required(true)
                .help("The first bed file (the ratio is first/second)"),
        )
        .arg(
            Arg::new("file2")
                .long("file2")
                .value_parser(value_parser!(PathBuf))
                .value_name("PATH")
                .required(true)
                .help("The second bed file (the ratio is first/second)"),
        )
        .arg(
            Arg::new("no_normalise")
                .action(ArgAction::SetTrue)
                .long("no-normalise")
                .alias("noNormalise")
                .help("Do not normalise files for read depth"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("out")
                .value_parser(value_parser!(PathBuf))
                .value_name("PATH")
                .help("Set output file [default: <stdout>]"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_parser(value_parser!(OutputFormat))
                .value_name("FORMAT")
                .ignore_case(true)
                .default_value("bed")
                .help("Output format (bed or wig)"),
        )
}

/// Handle command line options.  Set up Config structure
pub fn handle_cli() -> anyhow::Result<Config> {
    // Get matches from command line
    let m = cli_model().get_matches();

    // Setup logging
    init_log(&m)?;

    debug!("Processing command line options");

    let mut cfg = Config::new(
        m.get_one::<PathBuf>("file1")
            .expect("Missing file1")
            .to_owned(),
        m.get_one::<PathBuf>("file2")
            .expect("Missing file2")
            .to_owned(),
    );

    cfg.set_normalize(!m.get_flag("no_normalise"));
    cfg.set_format(
        *m.get_one::<OutputFormat>("format")
            .expect("Missing default output format"),
    );
    if let Some(p) = m.get_one::<PathBuf>("output") {
        cfg.set_output_file(p.to_owned())
    }

    debug!(
        "Ratio of {} over {}, normalization {}, output format {}",
        cfg.file1().display(),
        cfg.file2().display(),
        if cfg.normalize() { "on" } else { "off" },
        cfg.format()
    );

    Ok(cfg)
}
