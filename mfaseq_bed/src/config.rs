use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Bed,
    Wig,
}

impl FromStr for OutputFormat {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bed" => Ok(OutputFormat::Bed),
            "wig" => Ok(OutputFormat::Wig),
            _ => Err("output format must be bed or wig"),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputFormat::Bed => write!(f, "bed"),
            OutputFormat::Wig => write!(f, "wig"),
        }
    }
}

pub struct Config {
    file1: PathBuf,
    file2: PathBuf,
    normalize: bool,
    format: OutputFormat,
    output_file: Option<PathBuf>,
}

impl Config {
    pub fn new(file1: PathBuf, file2: PathBuf) -> Self {
        Self {
            file1,
            file2,
            normalize: true,
            format: OutputFormat::Bed,
            output_file: None,
        }
    }

    pub fn set_normalize(&mut self, x: bool) {
        self.normalize = x
    }

    pub fn set_format(&mut self, fmt: OutputFormat) {
        self.format = fmt
    }

    pub fn set_output_file(&mut self, p: PathBuf) {
        self.output_file = Some(p)
    }

    pub fn file1(&self) -> &Path {
        &self.file1
    }

    pub fn file2(&self) -> &Path {
        &self.file2
    }

    pub fn normalize(&self) -> bool {
        self.normalize
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }
}
