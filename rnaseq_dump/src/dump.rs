use std::{
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use compress_io::compress::CompressIo;
use serde_json::{json, Value};
use utils::web::Session;

use crate::params::{RnaSeqParams, TAXON_SEARCH_PATH};

/// Build the request for a tabular report of the given attributes (samples)
/// over all genes of the listed organisms
pub fn build_payload(samples: &[String], organisms: &[String]) -> anyhow::Result<Value> {
    // The service expects the organism list as a JSON encoded string
    let organism_param = serde_json::to_string(organisms)?;
    let attributes: Vec<&str> = std::iter::once("primary_key")
        .chain(samples.iter().map(|s| s.as_str()))
        .collect();
    Ok(json!({
        "searchConfig": {
            "parameters": {"organism": organism_param},
            "wdkWeight": 10
        },
        "reportConfig": {
            "attributes": attributes,
            "includeHeader": "true",
            "attachmentType": "plain",
            "applyFilter": "false"
        }
    }))
}

pub fn report_file_name(out_dir: &Path, experiment: &str) -> PathBuf {
    out_dir.join(format!("{}.txt", experiment.trim_start().replace(' ', "_")))
}

/// Copy report lines from `rdr` to `wrt`, dropping rows where every value
/// after the first (gene id) column is N/A.
/// Returns the number of lines kept and dropped
pub fn filter_report<R: BufRead, W: Write>(
    rdr: &mut R,
    wrt: &mut W,
) -> anyhow::Result<(usize, usize)> {
    let mut buf = String::new();
    let (mut kept, mut dropped) = (0, 0);
    loop {
        buf.clear();
        if rdr
            .read_line(&mut buf)
            .with_context(|| format!("Error reading report after {} lines", kept + dropped))?
            == 0
        {
            break;
        }
        let line = buf.trim_end();
        // Experiments are not tied to organisms in the web service, so data
        // are requested for all organisms and the empty rows removed here
        if line.split('\t').skip(1).all(|s| s == "N/A") {
            dropped += 1
        } else {
            writeln!(wrt, "{}", line)?;
            kept += 1
        }
    }
    Ok((kept, dropped))
}

pub fn dump_experiment(
    session: &Session,
    experiment: &str,
    samples: &[String],
    organisms: &[String],
    out_dir: &Path,
) -> anyhow::Result<()> {
    info!(
        "Attempting to retrieve RNAseq data for experiment \"{}\"",
        experiment
    );
    let payload = build_payload(samples, organisms)?;
    let path = format!("{}/reports/attributesTabular", TAXON_SEARCH_PATH);
    let res = session.post_json(&path, &payload)?;

    let fname = report_file_name(out_dir, experiment);
    info!(
        "Writing data from experiment \"{}\" to file {}",
        experiment,
        fname.display()
    );
    let mut wrt = CompressIo::new()
        .path(&fname)
        .bufwriter()
        .with_context(|| format!("Cannot open file {} for writing", fname.display()))?;
    let mut rdr = BufReader::new(res);
    let (kept, dropped) = filter_report(&mut rdr, &mut wrt)
        .with_context(|| format!("Error writing data to {}", fname.display()))?;
    wrt.flush()
        .with_context(|| format!("Error writing data to {}", fname.display()))?;
    debug!(
        "{} lines written to {}, {} lines without data skipped",
        kept,
        fname.display(),
        dropped
    );
    Ok(())
}

pub fn dump_experiments(
    session: &Session,
    params: &RnaSeqParams,
    out_dir: &Path,
) -> anyhow::Result<()> {
    for (experiment, samples) in params.experiments().iter() {
        dump_experiment(session, experiment, samples, params.organisms(), out_dir)?
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_layout() {
        let p = build_payload(
            &["pan_1".to_owned(), "pan_2".to_owned()],
            &["P. falciparum 3D7".to_owned(), "T. gondii ME49".to_owned()],
        )
        .unwrap();
        assert_eq!(
            p["searchConfig"]["parameters"]["organism"],
            "[\"P. falciparum 3D7\",\"T. gondii ME49\"]"
        );
        assert_eq!(p["searchConfig"]["wdkWeight"], 10);
        assert_eq!(
            p["reportConfig"]["attributes"],
            json!(["primary_key", "pan_1", "pan_2"])
        );
        assert_eq!(p["reportConfig"]["includeHeader"], "true");
        assert_eq!(p["reportConfig"]["attachmentType"], "plain");
        assert_eq!(p["reportConfig"]["applyFilter"], "false");
    }

    #[test]
    fn file_names() {
        assert_eq!(
            report_file_name(Path::new("out"), " Time series of 3D7"),
            PathBuf::from("out/Time_series_of_3D7.txt")
        );
    }

    #[test]
    fn na_rows_removed() {
        let input = "Gene ID\tpan_1\tpan_2\r\nPF3D7_0100100\t1.5\tN/A\nTGME49_200\tN/A\tN/A\nPF3D7_0100200\t0\t3 \n";
        let mut rdr = input.as_bytes();
        let mut out = Vec::new();
        let (kept, dropped) = filter_report(&mut rdr, &mut out).unwrap();
        assert_eq!((kept, dropped), (3, 1));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Gene ID\tpan_1\tpan_2\nPF3D7_0100100\t1.5\tN/A\nPF3D7_0100200\t0\t3\n"
        );
    }

    #[test]
    fn rows_without_values_removed() {
        let mut rdr: &[u8] = b"\nPF3D7_0100100\n";
        let mut out = Vec::new();
        assert_eq!(filter_report(&mut rdr, &mut out).unwrap(), (0, 2));
        assert!(out.is_empty());
    }
}
