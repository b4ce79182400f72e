use std::collections::{hash_map::Entry, HashMap};

use anyhow::Context;
use regex::Regex;
use serde::Deserialize;
use utils::web::Session;

use crate::vocab::VocabNode;

pub const TAXON_SEARCH_PATH: &str = "/a/service/record-types/transcript/searches/GenesByTaxon";
pub const TRANSCRIPT_RECORD_PATH: &str = "/a/service/record-types/transcript";

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "searchData")]
    search_data: SearchData,
}

#[derive(Debug, Deserialize)]
struct SearchData {
    parameters: Vec<SearchParameter>,
}

#[derive(Debug, Deserialize)]
struct SearchParameter {
    #[serde(rename = "displayName")]
    display_name: Option<String>,
    // Vocabularies of other parameters need not be trees
    vocabulary: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct RecordTypeResponse {
    attributes: Vec<AttributeField>,
}

#[derive(Debug, Deserialize)]
struct AttributeField {
    name: String,
    help: Option<String>,
}

/// Attribute (sample) names for each RNA-seq experiment, in the order the
/// experiments were first seen
#[derive(Debug, Default)]
pub struct ExperimentNodes {
    experiments: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl ExperimentNodes {
    pub fn add(&mut self, experiment: &str, node: &str) {
        let ix = match self.index.entry(experiment.to_owned()) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                trace!("Adding experiment {}", experiment);
                let ix = self.experiments.len();
                self.experiments.push((experiment.to_owned(), Vec::new()));
                e.insert(ix);
                ix
            }
        };
        self.experiments[ix].1.push(node.to_owned())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.experiments
            .iter()
            .map(|(e, v)| (e.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }
}

pub struct RnaSeqParams {
    organisms: Vec<String>,
    experiments: ExperimentNodes,
}

impl RnaSeqParams {
    pub fn fetch(session: &Session) -> anyhow::Result<Self> {
        let organisms = organism_list(session)?;
        let experiments = experiment_nodes(session)?;
        Ok(Self {
            organisms,
            experiments,
        })
    }

    pub fn organisms(&self) -> &[String] {
        &self.organisms
    }

    pub fn experiments(&self) -> &ExperimentNodes {
        &self.experiments
    }
}

pub fn organism_list(session: &Session) -> anyhow::Result<Vec<String>> {
    info!("Retrieving organism list");
    let resp: SearchResponse = session.get_json(TAXON_SEARCH_PATH)?;
    let v = organisms_from_search(resp)?;
    debug!("{} organisms found", v.len());
    Ok(v)
}

/// Flatten the vocabulary tree(s) of the Organism parameter
pub fn organisms_from_search(resp: SearchResponse) -> anyhow::Result<Vec<String>> {
    let mut organisms = Vec::new();
    for p in resp.search_data.parameters {
        if p.display_name.as_deref() == Some("Organism") {
            let vocab = p
                .vocabulary
                .ok_or_else(|| anyhow!("Organism parameter has no vocabulary"))?;
            let tree: VocabNode = serde_json::from_value(vocab)
                .with_context(|| "Organism vocabulary is not a valid tree")?;
            organisms.extend(tree.leaf_terms()?);
        }
    }
    Ok(organisms)
}

pub fn experiment_nodes(session: &Session) -> anyhow::Result<ExperimentNodes> {
    info!("Retrieving experiments and nodes");
    let resp: RecordTypeResponse = session.get_json(TRANSCRIPT_RECORD_PATH)?;
    let nodes = experiments_from_attributes(resp)?;
    debug!("{} experiments found", nodes.len());
    Ok(nodes)
}

/// RNA-seq attributes are recognized from their help text, which starts with
/// 'Transcript' and has the dataset name in the first [...] group, i.e.
/// "Transcript levels ... [Dataset: Strand specific time series]"
pub fn experiments_from_attributes(resp: RecordTypeResponse) -> anyhow::Result<ExperimentNodes> {
    let reg = Regex::new(r"\[.*?\]")?;
    let mut nodes = ExperimentNodes::default();
    for attr in resp.attributes {
        if let Some(help) = attr.help.as_deref().filter(|h| h.starts_with("Transcript")) {
            let grp = reg
                .find(help)
                .ok_or_else(|| anyhow!("No dataset found in help for attribute {}", attr.name))?
                .as_str();
            let dataset = grp.split(':').nth(1).ok_or_else(|| {
                anyhow!(
                    "Could not parse dataset name '{}' for attribute {}",
                    grp,
                    attr.name
                )
            })?;
            nodes.add(&dataset.replace(']', ""), &attr.name)
        }
    }
    Ok(nodes)
}
