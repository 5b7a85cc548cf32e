/// CLI argument definitions for the `cssdup` command.
///
/// Flags map onto `config::Overrides`; everything left unset falls back
/// to the config file or the built-in defaults.
use std::path::PathBuf;

use clap::Parser;

use crate::cli_help;
use crate::config::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "cssdup",
    version,
    about = "Find duplicate and conflicting CSS class definitions",
    long_about = cli_help::CSSDUP
)]
pub struct Cli {
    /// Directory to scan for stylesheets (default: ./prompts-site-webflow-export/css)
    pub path: Option<PathBuf>,

    /// Print the full report as JSON to stdout instead of the summary
    #[arg(long)]
    pub json: bool,

    /// Where to write the JSON report
    #[arg(long, value_name = "FILE")]
    pub json_out: Option<PathBuf>,

    /// Where to write the Markdown summary
    #[arg(long, value_name = "FILE")]
    pub markdown_out: Option<PathBuf>,

    /// Config file (default: ./cssdup.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip files whose path under the root matches GLOB (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Maximum property conflicts recorded per class (default: 3)
    #[arg(long, value_name = "N")]
    pub conflict_limit: Option<usize>,

    /// Analyze only, do not write report files
    #[arg(long)]
    pub no_write: bool,

    /// Log every analyzed file
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            root: self.path.clone(),
            json_out: self.json_out.clone(),
            markdown_out: self.markdown_out.clone(),
            exclude: self.exclude.clone(),
            conflict_limit: self.conflict_limit,
        }
    }
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
