use std::fs;
use std::path::Path;

use crate::error::AnalyzeError;

/// Print a horizontal separator of box-drawing chars.
pub fn separator(width: usize) -> String {
    "\u{2500}".repeat(width)
}

/// Write a rendered report to `path`, creating missing parent directories.
pub fn write_artifact(path: &Path, contents: &str) -> Result<(), AnalyzeError> {
    let to_write_error = |source| AnalyzeError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_write_error)?;
    }
    fs::write(path, contents).map_err(to_write_error)
}

#[cfg(test)]
#[path = "report_helpers_test.rs"]
mod tests;
