use std::{collections::HashMap, io::BufRead};

use anyhow::Context;

/// Read `old,new` id pairs, one per line.  Blank lines are skipped and
/// later entries for the same id replace earlier ones
pub fn read_mapping<R: BufRead>(rdr: &mut R, name: &str) -> anyhow::Result<HashMap<String, String>> {
    debug!("Reading in id mapping from {}", name);
    let mut buf = String::new();
    let mut line = 0;
    let mut mapping = HashMap::new();
    loop {
        buf.clear();
        if rdr
            .read_line(&mut buf)
            .with_context(|| format!("Error after reading {} lines from {}", line, name))?
            == 0
        {
            break;
        }
        line += 1;
        let s = buf.trim();
        if s.is_empty() {
            continue;
        }
        let fields: Vec<_> = s.split(',').collect();
        if fields.len() != 2 {
            return Err(anyhow!(
                "{}:{} Expected two comma separated fields (old id, new id), found {}",
                name,
                line,
                fields.len()
            ));
        }
        if let Some(prev) = mapping.insert(fields[0].to_owned(), fields[1].to_owned()) {
            trace!("Mapping for {} ({}) replaced", fields[0], prev);
        }
    }
    debug!(
        "Finished reading in {} lines; found {} ids",
        line,
        mapping.len()
    );
    Ok(mapping)
}
