use std::fs;

use anyhow::Context;
use utils::web::Session;

use crate::{config::Config, dump::dump_experiments, params::RnaSeqParams};

/// For each project, look up the organisms and the RNA-seq experiments with
/// their sample attributes, then download one report per experiment
pub fn process_projects(cfg: &Config) -> anyhow::Result<()> {
    let d = cfg.output_dir();
    if !d.exists() {
        fs::create_dir_all(d)
            .with_context(|| format!("Error creating output directory {}", d.display()))?;
    }
    for project in cfg.projects() {
        debug!("Processing project {}", project);
        let session = Session::connect(project)?;
        let params = RnaSeqParams::fetch(&session)
            .with_context(|| format!("Error retrieving experiment list from {}", project))?;
        if params.experiments().is_empty() {
            warn!("No RNA-seq experiments found for {}", session.project());
        }
        dump_experiments(&session, &params, d)?;
    }
    Ok(())
}
