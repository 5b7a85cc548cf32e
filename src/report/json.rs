use chrono::SecondsFormat;
use serde::Serialize;

use super::data::{AnalysisReport, Summary};
use crate::analyzer::FileFailure;
use crate::css::ClassDefinition;
use crate::detector::{DuplicateGroup, Priority, PropertyConflict};
use crate::walk::ScanWarning;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonGroup<'a> {
    class_name: &'a str,
    occurrence_count: usize,
    priority: Priority,
    distinct_property_set_count: usize,
    is_conflicting: bool,
    conflicts: &'a [PropertyConflict],
    occurrences: &'a [ClassDefinition],
}

impl<'a> From<&'a DuplicateGroup> for JsonGroup<'a> {
    fn from(g: &'a DuplicateGroup) -> Self {
        Self {
            class_name: &g.class_name,
            occurrence_count: g.occurrence_count(),
            priority: g.priority(),
            distinct_property_set_count: g.distinct_property_set_count,
            is_conflicting: g.is_conflicting,
            conflicts: &g.conflicts,
            occurrences: &g.occurrences,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    timestamp: String,
    root: &'a str,
    total_files: usize,
    total_definitions: usize,
    total_classes: usize,
    duplicate_classes: usize,
    summary: &'a Summary,
    duplicates: Vec<JsonGroup<'a>>,
    failures: &'a [FileFailure],
    scan_warnings: &'a [ScanWarning],
}

/// Serialize the report to pretty-printed JSON with camelCase keys.
pub fn format_json(report: &AnalysisReport) -> Result<String, serde_json::Error> {
    let output = JsonReport {
        timestamp: report
            .generated_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        root: &report.root,
        total_files: report.total_files,
        total_definitions: report.total_definitions,
        total_classes: report.total_classes,
        duplicate_classes: report.duplicate_classes(),
        summary: &report.summary,
        duplicates: report.duplicates.iter().map(JsonGroup::from).collect(),
        failures: &report.failures,
        scan_warnings: &report.scan_warnings,
    };
    serde_json::to_string_pretty(&output)
}

#[cfg(test)]
#[path = "json_test.rs"]
mod tests;
