use serde::Deserialize;

/// Node of a vocabulary tree as returned by the search parameter service.
/// Only leaf nodes need to carry a term
#[derive(Debug, Clone, Deserialize)]
pub struct VocabNode {
    pub children: Vec<VocabNode>,
    #[serde(default)]
    pub data: NodeData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeData {
    pub term: Option<String>,
}

impl VocabNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Collect the terms of all leaf nodes in depth first, left to right order
    pub fn leaf_terms(&self) -> anyhow::Result<Vec<String>> {
        if self.is_leaf() {
            match &self.data.term {
                Some(t) => Ok(vec![t.clone()]),
                None => Err(anyhow!("Vocabulary leaf node has no data.term field")),
            }
        } else {
            let mut v = Vec::new();
            for c in self.children.iter() {
                v.extend(c.leaf_terms()?)
            }
            Ok(v)
        }
    }
}
