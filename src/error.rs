use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::css::ParseError;

/// Failures that can occur while analyzing a stylesheet tree.
///
/// `Scan`, `Read` and `Parse` are recoverable: they are recorded against the
/// offending path and the run continues. Everything else ends the run.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("could not scan {path}: {message}")]
    Scan { path: PathBuf, message: String },

    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("{path} is not a directory")]
    InvalidRoot { path: PathBuf },

    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("invalid exclude pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not render markdown report")]
    Render(#[from] fmt::Error),
}
