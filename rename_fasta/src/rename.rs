use std::{
    collections::HashMap,
    io::{Read, Write},
};

use anyhow::Context;
use seq_io::fasta::{self, Record};

/// Sequence line width for renamed records
pub const LINE_WIDTH: usize = 60;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenameStats {
    pub renamed: usize,
    pub unchanged: usize,
}

/// Copy FASTA records from `rdr` to `wrt`, replacing the id of every record
/// found in `mapping` (the description is dropped).  Records without a
/// mapping are written unchanged
pub fn rename_records<R: Read, W: Write>(
    rdr: R,
    mapping: &HashMap<String, String>,
    wrt: &mut W,
) -> anyhow::Result<RenameStats> {
    let mut reader = fasta::Reader::new(rdr);
    let mut stats = RenameStats::default();
    while let Some(r) = reader.next() {
        let rec = r.with_context(|| {
            format!(
                "Error reading FASTA record {}",
                stats.renamed + stats.unchanged + 1
            )
        })?;
        let id = rec
            .id()
            .with_context(|| "Record id is not valid UTF-8")?;
        match mapping.get(id) {
            Some(new_id) => {
                trace!("Renaming {} to {}", id, new_id);
                fasta::write_id_desc(&mut *wrt, new_id.as_bytes(), None)?;
                fasta::write_wrap_seq_iter(&mut *wrt, rec.seq_lines(), LINE_WIDTH)?;
                stats.renamed += 1;
            }
            None => {
                warn!(
                    "Record {} in the fasta file cannot be found in the mapping file. This record will be written in the output fasta file with the original id",
                    id
                );
                rec.write_unchanged(&mut *wrt)?;
                stats.unchanged += 1;
            }
        }
    }
    Ok(stats)
}
