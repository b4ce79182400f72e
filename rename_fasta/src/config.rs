use std::path::{Path, PathBuf};

pub struct Config {
    fasta_file: PathBuf,
    mapping_file: PathBuf,
    output_file: PathBuf,
}

impl Config {
    pub fn new(fasta_file: PathBuf, mapping_file: PathBuf, output_file: Option<PathBuf>) -> Self {
        let output_file = output_file.unwrap_or_else(|| default_output(&fasta_file));
        Self {
            fasta_file,
            mapping_file,
            output_file,
        }
    }

    pub fn fasta_file(&self) -> &Path {
        &self.fasta_file
    }

    pub fn mapping_file(&self) -> &Path {
        &self.mapping_file
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }
}

/// renamed_<name> in the same directory as the input
pub fn default_output(fasta_file: &Path) -> PathBuf {
    let name = fasta_file
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    fasta_file.with_file_name(format!("renamed_{}", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_name() {
        assert_eq!(
            default_output(Path::new("data/genome.fasta")),
            PathBuf::from("data/renamed_genome.fasta")
        );
        let cfg = Config::new(
            PathBuf::from("genome.fa"),
            PathBuf::from("map.csv"),
            Some(PathBuf::from("out.fa")),
        );
        assert_eq!(cfg.output_file(), Path::new("out.fa"));
    }
}
