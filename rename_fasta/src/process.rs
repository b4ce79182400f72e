use std::io::Write;

use anyhow::Context;
use compress_io::compress::CompressIo;

use crate::{config::Config, mapping::read_mapping, rename::rename_records};

pub fn process_fasta(cfg: &Config) -> anyhow::Result<()> {
    info!(
        "Renaming deflines in fasta file {} using mapping file {}",
        cfg.fasta_file().display(),
        cfg.mapping_file().display()
    );
    info!("Output will be written to {}", cfg.output_file().display());

    let mapping = {
        let mut rdr = CompressIo::new()
            .path(cfg.mapping_file())
            .bufreader()
            .with_context(|| {
                format!(
                    "Cannot open mapping file {}",
                    cfg.mapping_file().display()
                )
            })?;
        read_mapping(&mut rdr, &cfg.mapping_file().display().to_string())?
    };

    let rdr = CompressIo::new()
        .path(cfg.fasta_file())
        .bufreader()
        .with_context(|| format!("Cannot open fasta file {}", cfg.fasta_file().display()))?;
    let mut wrt = CompressIo::new()
        .path(cfg.output_file())
        .bufwriter()
        .with_context(|| {
            format!(
                "Cannot open output file {}",
                cfg.output_file().display()
            )
        })?;

    let stats = rename_records(rdr, &mapping, &mut wrt)
        .with_context(|| format!("Error processing {}", cfg.fasta_file().display()))?;
    wrt.flush()
        .with_context(|| format!("Error writing to {}", cfg.output_file().display()))?;

    if stats.unchanged > 0 {
        warn!(
            "{} records had no mapping and were written with their original id",
            stats.unchanged
        );
    }
    info!(
        "Complete! {} records renamed.  Please find your output at {}",
        stats.renamed,
        cfg.output_file().display()
    );
    Ok(())
}
