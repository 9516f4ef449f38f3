use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocError {
    #[error("EOF encountered while scanning block comment opened at line {line}")]
    UnterminatedBlockComment { line: usize },

    #[error("malformed class declaration at line {line}: '{text}'")]
    MalformedClass { line: usize, text: String },

    #[error("malformed function declaration at line {line}: '{text}'")]
    MalformedFunction { line: usize, text: String },

    #[error("cannot determine body indentation of definition at line {line}: '{text}'")]
    UndeterminedBody { line: usize, text: String },

    #[error("unsupported file type, ext: '.{ext}'")]
    UnsupportedSyntax { ext: String },

    #[error("no inputs could be found on the filesystem")]
    NoInputs,

    #[error("output path {0:?} exists and is not a directory")]
    OutputNotDirectory(PathBuf),

    #[error("invalid syntax pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to serialize module summary: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, DocError>;
