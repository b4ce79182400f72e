use std::fs;

use anyhow::Context;
use utils::web::Session;

use crate::{config::Config, fetch};

pub fn process_project(cfg: &Config) -> anyhow::Result<()> {
    if let Some(d) = cfg.output_dir() {
        if !d.exists() {
            fs::create_dir_all(d)
                .with_context(|| format!("Error creating output directory {}", d.display()))?;
        }
    }
    let session = Session::connect(cfg.project())?;
    let urls = fetch::fasta_urls(&session, cfg.seq_type(), cfg.include_unannotated())?;
    if urls.is_empty() {
        warn!("No {} fasta files found for {}", cfg.seq_type(), cfg.project());
    }
    fetch::download_all(&session, &urls, cfg.seq_type(), cfg.output_dir())
}
