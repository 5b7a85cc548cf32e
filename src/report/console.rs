use std::path::Path;

use super::data::AnalysisReport;
use crate::report_helpers;

/// Print a boxed summary of the analysis to stdout.
pub fn print_summary(report: &AnalysisReport, artifacts: &[&Path]) {
    let separator = report_helpers::separator(68);
    let s = &report.summary;

    println!("{separator}");
    println!(" CSS Duplicate Class Analysis");
    println!();
    println!(" Files analyzed:       {:>42}", report.total_files);
    println!(" Class definitions:    {:>42}", report.total_definitions);
    println!(" Unique classes:       {:>42}", report.total_classes);
    println!(" Classes duplicated:   {:>42}", report.duplicate_classes());
    println!();
    println!(" High priority (3+, conflicting): {:>31}", s.high_priority_conflicts);
    println!(" Medium priority (2, conflicting):{:>31}", s.medium_priority_conflicts);
    println!(" Harmless (identical):            {:>31}", s.harmless_duplicates);

    if !report.failures.is_empty() || !report.scan_warnings.is_empty() {
        println!();
        println!(" Files skipped:        {:>42}", report.failures.len());
        println!(" Unreadable dirs:      {:>42}", report.scan_warnings.len());
    }

    if !artifacts.is_empty() {
        println!();
        println!(" Reports saved:");
        for path in artifacts {
            println!("   {}", path.display());
        }
    }
    println!("{separator}");
}
