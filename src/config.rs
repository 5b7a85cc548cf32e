//! Analyzer settings.
//!
//! Built from defaults, then an optional TOML file, then command-line
//! overrides. Every field of the file is optional:
//!
//! ```toml
//! root = "styles"
//! extension = "css"
//! backup_marker = ".backup"
//! exclude = ["vendor/**"]
//! conflict_limit = 3
//! top_files = 5
//! json_out = "css-duplicate-analysis.json"
//! markdown_out = "CSS-DUPLICATE-ANALYSIS.md"
//!
//! [markdown]
//! high_priority = 10
//! medium_priority = 15
//! harmless = 10
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::detector::DEFAULT_CONFLICT_LIMIT;
use crate::error::AnalyzeError;

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "cssdup.toml";

pub const DEFAULT_ROOT: &str = "./prompts-site-webflow-export/css";
pub const DEFAULT_JSON_OUT: &str = "css-duplicate-analysis.json";
pub const DEFAULT_MARKDOWN_OUT: &str = "CSS-DUPLICATE-ANALYSIS.md";

/// How many groups each Markdown section lists before truncating.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownLimits {
    pub high_priority: usize,
    pub medium_priority: usize,
    pub harmless: usize,
}

impl Default for MarkdownLimits {
    fn default() -> Self {
        Self {
            high_priority: 10,
            medium_priority: 15,
            harmless: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub root: PathBuf,
    pub extension: String,
    pub backup_marker: String,
    pub exclude: Vec<String>,
    pub conflict_limit: usize,
    pub top_files: usize,
    pub json_out: PathBuf,
    pub markdown_out: PathBuf,
    pub markdown: MarkdownLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            extension: "css".to_string(),
            backup_marker: ".backup".to_string(),
            exclude: Vec::new(),
            conflict_limit: DEFAULT_CONFLICT_LIMIT,
            top_files: 5,
            json_out: PathBuf::from(DEFAULT_JSON_OUT),
            markdown_out: PathBuf::from(DEFAULT_MARKDOWN_OUT),
            markdown: MarkdownLimits::default(),
        }
    }
}

/// Values given on the command line. `None` keeps the configured value;
/// `exclude` patterns are added to the configured ones.
#[derive(Debug, Default)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub json_out: Option<PathBuf>,
    pub markdown_out: Option<PathBuf>,
    pub exclude: Vec<String>,
    pub conflict_limit: Option<usize>,
}

impl Config {
    /// Parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self, AnalyzeError> {
        let content = fs::read_to_string(path).map_err(|err| AnalyzeError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        toml::from_str(&content).map_err(|err| AnalyzeError::Config {
            path: path.to_path_buf(),
            message: err.message().to_string(),
        })
    }

    /// Load `explicit` if given (it must exist), otherwise
    /// `cssdup.toml` in `dir` when present, otherwise the defaults.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self, AnalyzeError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(root) = overrides.root {
            self.root = root;
        }
        if let Some(path) = overrides.json_out {
            self.json_out = path;
        }
        if let Some(path) = overrides.markdown_out {
            self.markdown_out = path;
        }
        if let Some(limit) = overrides.conflict_limit {
            self.conflict_limit = limit;
        }
        self.exclude.extend(overrides.exclude);
        self
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
