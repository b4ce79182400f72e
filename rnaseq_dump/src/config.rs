use std::path::{Path, PathBuf};

pub struct Config {
    projects: Vec<String>,
    output_dir: PathBuf,
}

impl Config {
    pub fn new(projects: Vec<String>, output_dir: PathBuf) -> Self {
        Self {
            projects,
            output_dir,
        }
    }

    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Split a comma separated project list, i.e., "CryptoDB,ToxoDB"
pub fn parse_project_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(|p| p.to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_list() {
        assert_eq!(parse_project_list("PlasmoDB"), vec!["PlasmoDB"]);
        assert_eq!(
            parse_project_list("CryptoDB, ToxoDB,"),
            vec!["CryptoDB", "ToxoDB"]
        );
        assert!(parse_project_list(",").is_empty());
    }
}
