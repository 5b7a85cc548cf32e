//! Analysis pipeline: scan, extract, detect, report.
//!
//! Each stage returns a value consumed by the next one. Per-file read and
//! parse failures are recorded in the `Collected` accumulator and never stop
//! the run; only setup problems and artifact writes are fatal.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::css::{ClassDefinition, analyze_stylesheet};
use crate::detector::detect_duplicates;
use crate::error::AnalyzeError;
use crate::report::{self, AnalysisReport};
use crate::report_helpers;
use crate::walk::{self, StylesheetFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Read,
    Parse,
}

/// A stylesheet that contributed no definitions because it could not be
/// read or parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub file: String,
    pub kind: FailureKind,
    pub message: String,
}

/// Everything extracted from the scanned files.
#[derive(Debug, Default)]
pub struct Collected {
    pub definitions: Vec<ClassDefinition>,
    pub failures: Vec<FileFailure>,
}

/// Read and parse one stylesheet.
pub fn analyze_file(path: &Path) -> Result<Vec<ClassDefinition>, AnalyzeError> {
    let bytes = fs::read(path).map_err(|source| AnalyzeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    // Stray non-UTF-8 bytes (usually Latin-1 comments) become U+FFFD.
    let content = String::from_utf8_lossy(&bytes);
    analyze_stylesheet(&content, &walk::display_path(path)).map_err(|source| {
        AnalyzeError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Fold every file into a `Collected` accumulator, in the given order.
pub fn collect_definitions(files: &[PathBuf]) -> Collected {
    files.iter().fold(Collected::default(), |mut acc, path| {
        let file = walk::display_path(path);
        match analyze_file(path) {
            Ok(definitions) => {
                debug!(file = %file, definitions = definitions.len(), "analyzed stylesheet");
                acc.definitions.extend(definitions);
            }
            Err(AnalyzeError::Parse { source, .. }) => {
                warn!(file = %file, error = %source, "could not parse stylesheet, skipping");
                acc.failures.push(FileFailure {
                    file,
                    kind: FailureKind::Parse,
                    message: source.to_string(),
                });
            }
            Err(err) => {
                error!("{err}");
                let message = match err {
                    AnalyzeError::Read { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                acc.failures.push(FileFailure {
                    file,
                    kind: FailureKind::Read,
                    message,
                });
            }
        }
        acc
    })
}

/// Run the full analysis over `cfg.root` and build the report.
pub fn analyze(cfg: &Config) -> Result<AnalysisReport, AnalyzeError> {
    let filter = StylesheetFilter::new(&cfg.extension, &cfg.backup_marker, &cfg.exclude)?;
    let scan = walk::find_stylesheets(&cfg.root, &filter)?;
    info!(
        root = %cfg.root.display(),
        files = scan.files.len(),
        "found stylesheets to analyze"
    );

    let collected = collect_definitions(&scan.files);
    info!(
        definitions = collected.definitions.len(),
        failures = collected.failures.len(),
        "extracted class definitions"
    );

    let groups = detect_duplicates(&collected.definitions, cfg.conflict_limit);
    Ok(report::build_report(
        &cfg.root,
        scan,
        collected,
        groups,
        cfg.top_files,
        Utc::now(),
    ))
}

/// Write the JSON and Markdown artifacts to the configured paths.
pub fn write_artifacts(report: &AnalysisReport, cfg: &Config) -> Result<(), AnalyzeError> {
    let json = report::format_json(report)?;
    report_helpers::write_artifact(&cfg.json_out, &json)?;

    let markdown = report::render_markdown(report, &cfg.markdown)?;
    report_helpers::write_artifact(&cfg.markdown_out, &markdown)?;

    info!(
        json = %cfg.json_out.display(),
        markdown = %cfg.markdown_out.display(),
        "reports saved"
    );
    Ok(())
}

/// How results are delivered.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Print the structured report to stdout instead of the console summary.
    pub json: bool,
    /// Write the JSON and Markdown artifacts.
    pub write: bool,
}

/// Entry point: analyze, write artifacts, print the summary.
pub fn run(cfg: &Config, opts: RunOptions) -> Result<(), Box<dyn Error>> {
    let report = analyze(cfg)?;

    if opts.write {
        write_artifacts(&report, cfg)?;
    }

    if opts.json {
        println!("{}", report::format_json(&report)?);
    } else {
        let artifacts: Vec<&Path> = if opts.write {
            vec![cfg.json_out.as_path(), cfg.markdown_out.as_path()]
        } else {
            Vec::new()
        };
        report::print_summary(&report, &artifacts);
    }

    Ok(())
}

#[cfg(test)]
#[path = "analyzer_test.rs"]
mod tests;
