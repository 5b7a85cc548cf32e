use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};

use super::data::{AnalysisReport, FileStats, Summary};
use crate::analyzer::Collected;
use crate::detector::{DuplicateGroup, Priority, count_unique_classes};
use crate::walk::{self, ScanResult};

/// Rank files by how many duplicate-group occurrences they hold. Ties keep
/// the order in which files were first seen.
pub fn files_with_most_duplicates(groups: &[DuplicateGroup], top: usize) -> Vec<FileStats> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<FileStats> = Vec::new();

    for group in groups {
        for def in &group.occurrences {
            let slot = *index.entry(def.source_file.as_str()).or_insert_with(|| {
                stats.push(FileStats {
                    file: def.source_file.clone(),
                    duplicate_count: 0,
                    conflicting_count: 0,
                });
                stats.len() - 1
            });
            stats[slot].duplicate_count += 1;
            if group.is_conflicting {
                stats[slot].conflicting_count += 1;
            }
        }
    }

    stats.sort_by(|a, b| b.duplicate_count.cmp(&a.duplicate_count));
    stats.truncate(top);
    stats
}

/// Bucket counts in a single pass over the groups.
pub fn summarize(groups: &[DuplicateGroup], top_files: usize) -> Summary {
    let mut summary = groups.iter().fold(Summary::default(), |mut acc, g| {
        match g.priority() {
            Priority::High => acc.high_priority_conflicts += 1,
            Priority::Medium => acc.medium_priority_conflicts += 1,
            Priority::Harmless => acc.harmless_duplicates += 1,
        }
        acc.total_occurrences += g.occurrence_count();
        acc
    });
    summary.files_with_most_duplicates = files_with_most_duplicates(groups, top_files);
    summary
}

/// Assemble the final report from the outputs of every pipeline stage.
pub fn build_report(
    root: &Path,
    scan: ScanResult,
    collected: Collected,
    groups: Vec<DuplicateGroup>,
    top_files: usize,
    generated_at: DateTime<Utc>,
) -> AnalysisReport {
    let summary = summarize(&groups, top_files);
    AnalysisReport {
        generated_at,
        root: walk::display_path(root),
        total_files: scan.files.len(),
        total_definitions: collected.definitions.len(),
        total_classes: count_unique_classes(&collected.definitions),
        duplicates: groups,
        failures: collected.failures,
        scan_warnings: scan.warnings,
        summary,
    }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
