use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
pub enum OutputFormat {
    /// One LaTeX fragment per module plus an index that inputs them all
    Latex,
    /// One JSON summary per module plus a JSON index
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Latex => "tex",
            OutputFormat::Json => "json",
        }
    }
}

/// A documentation generator for Python3 comments and docstrings.
#[derive(Debug, Clone, Parser)]
#[command(name = "dochelper", version)]
pub struct Config {
    /// Path to a module or package.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Directory that receives the generated files.
    #[arg(short = 'o', long = "output-path", visible_alias = "output", default_value = ".")]
    pub output: PathBuf,

    /// Worker threads; defaults to the number of CPUs.
    #[arg(short = 'j', long)]
    pub threads: Option<usize>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Latex)]
    pub format: OutputFormat,
}

impl Config {
    pub fn new(paths: Vec<PathBuf>, output: PathBuf) -> Self {
        Config {
            paths,
            output,
            threads: None,
            format: OutputFormat::Latex,
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn thread_count(&self) -> usize {
        match self.threads {
            Some(n) if n > 0 => n,
            _ => num_cpus::get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_command_line() {
        let config = Config::try_parse_from([
            "dochelper", "a.py", "pkg", "-o", "out", "-j", "2", "--format", "json",
        ])
        .unwrap();
        assert_eq!(config.paths, vec![PathBuf::from("a.py"), PathBuf::from("pkg")]);
        assert_eq!(config.output, PathBuf::from("out"));
        assert_eq!(config.thread_count(), 2);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["dochelper", "a.py"]).unwrap();
        assert_eq!(config.output, PathBuf::from("."));
        assert_eq!(config.format, OutputFormat::Latex);
        assert!(config.thread_count() >= 1);
    }

    #[test]
    fn requires_a_path() {
        assert!(Config::try_parse_from(["dochelper"]).is_err());
    }
}
