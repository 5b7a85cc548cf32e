use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analyzer::FileFailure;
use crate::detector::{DuplicateGroup, Priority};
use crate::walk::ScanWarning;

/// Duplicate occurrences attributed to one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStats {
    pub file: String,
    pub duplicate_count: usize,
    pub conflicting_count: usize,
}

/// Counts per priority bucket plus the files most involved in duplication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub high_priority_conflicts: usize,
    pub medium_priority_conflicts: usize,
    pub harmless_duplicates: usize,
    pub total_occurrences: usize,
    pub files_with_most_duplicates: Vec<FileStats>,
}

/// Result of one analysis run. Built once, then serialized.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub root: String,
    /// Every stylesheet found, including those that failed to parse.
    pub total_files: usize,
    pub total_definitions: usize,
    /// Distinct class names across all files.
    pub total_classes: usize,
    pub duplicates: Vec<DuplicateGroup>,
    pub failures: Vec<FileFailure>,
    pub scan_warnings: Vec<ScanWarning>,
    pub summary: Summary,
}

impl AnalysisReport {
    pub fn duplicate_classes(&self) -> usize {
        self.duplicates.len()
    }

    /// Groups in one priority bucket, in report order.
    pub fn groups_with(&self, priority: Priority) -> impl Iterator<Item = &DuplicateGroup> {
        self.duplicates
            .iter()
            .filter(move |g| g.priority() == priority)
    }
}
