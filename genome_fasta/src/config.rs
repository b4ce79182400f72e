use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceType {
    Genomic,
    Transcript,
    Cds,
    Protein,
}

impl FromStr for SequenceType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "genomic" => Ok(SequenceType::Genomic),
            "transcript" => Ok(SequenceType::Transcript),
            "cds" => Ok(SequenceType::Cds),
            "protein" => Ok(SequenceType::Protein),
            _ => Err("sequence type must be one of genomic, transcript, cds or protein"),
        }
    }
}

impl fmt::Display for SequenceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            SequenceType::Genomic => "genomic",
            SequenceType::Transcript => "transcript",
            SequenceType::Cds => "cds",
            SequenceType::Protein => "protein",
        };
        write!(f, "{}", s)
    }
}

pub struct Config {
    project: String,
    seq_type: SequenceType,
    include_unannotated: bool,
    output_dir: Option<PathBuf>,
}

impl Config {
    pub fn new(
        project: String,
        seq_type: SequenceType,
        include_unannotated: bool,
    ) -> anyhow::Result<Self> {
        if include_unannotated && seq_type != SequenceType::Genomic {
            Err(anyhow!(
                "Sorry, CDS, transcript and protein fasta files are only available for annotated genomes.  Please remove the --include-unannotated flag or choose --type genomic and try again"
            ))
        } else {
            Ok(Self {
                project,
                seq_type,
                include_unannotated,
                output_dir: None,
            })
        }
    }

    pub fn set_output_dir(&mut self, d: PathBuf) {
        self.output_dir = Some(d)
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn seq_type(&self) -> SequenceType {
        self.seq_type
    }

    pub fn include_unannotated(&self) -> bool {
        self.include_unannotated
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_type_names() {
        for s in ["genomic", "transcript", "cds", "protein"] {
            assert_eq!(s.parse::<SequenceType>().unwrap().to_string(), s);
        }
        assert_eq!("CDS".parse::<SequenceType>().unwrap(), SequenceType::Cds);
        assert!("rna".parse::<SequenceType>().is_err());
    }

    #[test]
    fn unannotated_only_for_genomic() {
        assert!(Config::new("PlasmoDB".to_owned(), SequenceType::Genomic, true).is_ok());
        assert!(Config::new("PlasmoDB".to_owned(), SequenceType::Protein, false).is_ok());
        for t in [
            SequenceType::Transcript,
            SequenceType::Cds,
            SequenceType::Protein,
        ] {
            assert!(Config::new("PlasmoDB".to_owned(), t, true).is_err());
        }
    }
}
