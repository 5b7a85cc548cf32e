use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use serde::Serialize;
use tracing::warn;

use crate::error::AnalyzeError;

/// Directory that could not be read during the scan. The scan continues
/// with its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanWarning {
    pub path: String,
    pub message: String,
}

/// Stylesheets found under a root, in walk order, plus every directory that
/// could not be read.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: Vec<PathBuf>,
    pub warnings: Vec<ScanWarning>,
}

/// Decides which walked files are stylesheets worth analyzing.
pub struct StylesheetFilter {
    extension: String,
    backup_marker: String,
    excludes: GlobSet,
}

impl StylesheetFilter {
    /// `extension` is matched against the end of the file name (a leading
    /// dot is added when missing). Paths containing `backup_marker` and
    /// paths matching any `exclude` glob are rejected.
    pub fn new(
        extension: &str,
        backup_marker: &str,
        exclude: &[String],
    ) -> Result<Self, AnalyzeError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude {
            let glob = Glob::new(pattern).map_err(|err| AnalyzeError::Pattern {
                pattern: pattern.clone(),
                message: err.kind().to_string(),
            })?;
            builder.add(glob);
        }
        let excludes = builder.build().map_err(|err| AnalyzeError::Pattern {
            pattern: exclude.join(", "),
            message: err.to_string(),
        })?;

        let extension = if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{extension}")
        };

        Ok(Self {
            extension,
            backup_marker: backup_marker.to_string(),
            excludes,
        })
    }

    /// Check a path relative to the scan root.
    pub fn accepts(&self, relative: &Path) -> bool {
        let Some(name) = relative.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        if !name.ends_with(&self.extension) {
            return false;
        }
        if !self.backup_marker.is_empty()
            && relative.to_string_lossy().contains(&self.backup_marker)
        {
            return false;
        }
        !self.excludes.is_match(relative)
    }
}

/// Best-effort path for a walk error, looking through the wrapping layers
/// `ignore` adds.
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        _ => None,
    }
}

/// Strip a leading `./` so reported paths read `css/a.css`, not `./css/a.css`.
pub fn display_path(path: &Path) -> String {
    match path.strip_prefix(".") {
        Ok(rest) if !rest.as_os_str().is_empty() => rest.display().to_string(),
        _ => path.display().to_string(),
    }
}

/// Recursively collect stylesheets under `root`.
///
/// Every file is considered: `.gitignore` and hidden-file rules are off.
/// Symlinks are not followed, and entries are visited in file-name order so
/// repeated runs see files in the same order. Unreadable directories are
/// recorded as warnings instead of failing the scan.
pub fn find_stylesheets(root: &Path, filter: &StylesheetFilter) -> Result<ScanResult, AnalyzeError> {
    if !root.is_dir() {
        return Err(AnalyzeError::InvalidRoot {
            path: root.to_path_buf(),
        });
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut result = ScanResult::default();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                let path = error_path(&err).unwrap_or(root);
                let warning = AnalyzeError::Scan {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                };
                warn!("{warning}");
                result.warnings.push(ScanWarning {
                    path: display_path(path),
                    message: err.to_string(),
                });
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        if filter.accepts(relative) {
            result.files.push(path.to_path_buf());
        }
    }

    Ok(result)
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod tests;
