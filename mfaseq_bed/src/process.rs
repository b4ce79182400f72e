use std::io::Write;

use anyhow::Context;
use compress_io::compress::CompressIo;

use crate::{
    config::Config,
    io::{read_paired, IntervalReader},
    output::write_ratios,
};

/// Strategy
///
/// Read both count files in a single pass, storing the windows and
/// accumulating the total counts for each file.  Once all input is read,
/// the normalization factor can be calculated and the ratios output
pub fn process_files(cfg: &Config) -> anyhow::Result<()> {
    debug!("Starting processing");
    let mut rdr_e = IntervalReader::open(cfg.file1())?;
    let mut rdr_g = IntervalReader::open(cfg.file2())?;
    let map = read_paired(&mut rdr_e, &mut rdr_g)?;

    let factor = map.norm_factor(cfg.normalize())?;
    debug!("Normalization factor: {}", factor);

    let mut wrt = CompressIo::new()
        .opt_path(cfg.output_file())
        .bufwriter()
        .with_context(|| "Failed to open output file")?;
    write_ratios(&map, factor, cfg.format(), &mut wrt)?;
    wrt.flush().with_context(|| "Error writing output")?;
    info!("Ratios written for {} windows", map.rows());
    Ok(())
}
