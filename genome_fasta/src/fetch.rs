use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use reqwest::Url;
use serde::Deserialize;
use utils::web::Session;

use crate::config::SequenceType;

#[derive(Debug, Deserialize)]
pub struct OrganismResponse {
    response: ResponseBody,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    recordset: RecordSet,
}

#[derive(Debug, Deserialize)]
struct RecordSet {
    records: Vec<OrganismRecord>,
}

#[derive(Debug, Deserialize)]
struct OrganismRecord {
    #[serde(default)]
    id: Option<String>,
    fields: Vec<RecordField>,
}

#[derive(Debug, Deserialize)]
struct RecordField {
    value: Option<String>,
}

/// Organism question path, requesting the field with the FASTA URL
pub fn question_path(seq_type: SequenceType, include_unannotated: bool) -> String {
    let field = if seq_type == SequenceType::Genomic {
        "URLGenomeFasta"
    } else {
        "URLproteinFasta"
    };
    let question = if include_unannotated {
        "GenomeDataTypes"
    } else {
        "GeneMetrics"
    };
    format!(
        "/webservices/OrganismQuestions/{}.json?o-fields={}",
        question, field
    )
}

pub fn fasta_urls(
    session: &Session,
    seq_type: SequenceType,
    include_unannotated: bool,
) -> anyhow::Result<Vec<String>> {
    info!("Retrieving organism list from {}", session.base_url());
    let resp: OrganismResponse = session.get_json(&question_path(seq_type, include_unannotated))?;
    let urls = urls_from_response(resp);
    debug!("{} FASTA urls found", urls.len());
    Ok(urls)
}

/// The URL is the value of the last field of each record
pub fn urls_from_response(resp: OrganismResponse) -> Vec<String> {
    let mut v = Vec::new();
    for rec in resp.response.recordset.records {
        match rec.fields.into_iter().last().and_then(|f| f.value) {
            Some(url) => v.push(url),
            None => warn!(
                "No FASTA url found for record {}",
                rec.id.as_deref().unwrap_or("<unknown>")
            ),
        }
    }
    v
}

/// Only protein URLs are returned for annotated genomes; the transcript and
/// CDS files live alongside them
pub fn rewrite_url(url: &str, seq_type: SequenceType) -> String {
    match seq_type {
        SequenceType::Cds => url.replace("Proteins", "CDSs"),
        SequenceType::Transcript => url.replace("Proteins", "Transcripts"),
        _ => url.to_owned(),
    }
}

/// Last component of the URL path
pub fn url_file_name(url: &str) -> anyhow::Result<String> {
    let u = Url::parse(url).with_context(|| format!("Invalid url {}", url))?;
    u.path_segments()
        .and_then(|mut s| s.next_back())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_owned())
        .ok_or_else(|| anyhow!("No file name found in url {}", url))
}

pub fn download_all(
    session: &Session,
    urls: &[String],
    seq_type: SequenceType,
    out_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let dir = out_dir.map(|p| p.to_owned()).unwrap_or_else(PathBuf::new);
    for url in urls.iter() {
        let url = rewrite_url(url, seq_type);
        let name = url_file_name(&url)?;
        info!("Retrieving {} fasta file {} from {}", seq_type, name, url);
        let opath = dir.join(&name);
        let mut wrt = BufWriter::new(
            fs::File::create(&opath)
                .with_context(|| format!("problem creating output file {}", opath.display()))?,
        );
        let n = session.download(&url, &mut wrt)?;
        wrt.flush()
            .with_context(|| format!("Error writing to {}", opath.display()))?;
        debug!("{} bytes written to {}", n, opath.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn question_paths() {
        assert_eq!(
            question_path(SequenceType::Genomic, true),
            "/webservices/OrganismQuestions/GenomeDataTypes.json?o-fields=URLGenomeFasta"
        );
        assert_eq!(
            question_path(SequenceType::Cds, false),
            "/webservices/OrganismQuestions/GeneMetrics.json?o-fields=URLproteinFasta"
        );
    }

    #[test]
    fn last_field_is_url() {
        let resp: OrganismResponse = serde_json::from_value(json!({
            "response": {"recordset": {"records": [
                {"id": "pfal3D7", "fields": [
                    {"name": "organism", "value": "P. falciparum 3D7"},
                    {"name": "URLproteinFasta", "value": "https://PlasmoDB.org/a/PlasmoDB-66_Pfalciparum3D7_AnnotatedProteins.fasta"}
                ]},
                {"id": "empty", "fields": []},
                {"id": "pviv", "fields": [{"name": "URLproteinFasta", "value": "https://PlasmoDB.org/b/Pvivax_AnnotatedProteins.fasta"}]}
            ]}}
        }))
        .unwrap();
        assert_eq!(
            urls_from_response(resp),
            vec![
                "https://PlasmoDB.org/a/PlasmoDB-66_Pfalciparum3D7_AnnotatedProteins.fasta",
                "https://PlasmoDB.org/b/Pvivax_AnnotatedProteins.fasta"
            ]
        );
    }

    #[test]
    fn url_rewriting() {
        let u = "https://x.org/d/Pf_AnnotatedProteins.fasta";
        assert_eq!(
            rewrite_url(u, SequenceType::Cds),
            "https://x.org/d/Pf_AnnotatedCDSs.fasta"
        );
        assert_eq!(
            rewrite_url(u, SequenceType::Transcript),
            "https://x.org/d/Pf_AnnotatedTranscripts.fasta"
        );
        assert_eq!(rewrite_url(u, SequenceType::Protein), u);
    }

    #[test]
    fn file_names() {
        assert_eq!(
            url_file_name("https://x.org/common/downloads/Pf_Genome.fasta").unwrap(),
            "Pf_Genome.fasta"
        );
        assert!(url_file_name("https://x.org/dir/").is_err());
        assert!(url_file_name("not a url").is_err());
    }
}
