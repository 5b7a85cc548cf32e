use std::fmt::{self, Write};

use super::data::AnalysisReport;
use crate::analyzer::FailureKind;
use crate::config::MarkdownLimits;
use crate::detector::{DuplicateGroup, Priority};

/// Format "top N of M" or just "N" when not truncated.
fn top_of(shown: usize, total: usize) -> String {
    if shown < total {
        format!("top {shown} of {total}")
    } else {
        format!("{total}")
    }
}

/// `property (a vs b)` for the first recorded conflict, if any.
fn sample_conflict(group: &DuplicateGroup) -> Option<String> {
    group.conflicts.first().map(|c| {
        format!(
            "{} ({} vs {})",
            c.property, c.value_in_first, c.value_in_second
        )
    })
}

fn location(file: &str, line: Option<usize>) -> String {
    match line {
        Some(l) => format!("{file}:{l}"),
        None => format!("{file}:?"),
    }
}

/// Emit the "showing top N of M" footer when a section was truncated.
fn truncation_note(out: &mut String, shown: usize, total: usize) -> fmt::Result {
    if shown < total {
        writeln!(out, "_Showing {}._", top_of(shown, total))?;
        writeln!(out)?;
    }
    Ok(())
}

fn high_priority_section(out: &mut String, report: &AnalysisReport, limit: usize) -> fmt::Result {
    writeln!(out, "## High Priority Conflicts (3+ occurrences)")?;
    writeln!(out)?;
    let total = report.summary.high_priority_conflicts;
    if total == 0 {
        writeln!(out, "None.")?;
        return writeln!(out);
    }
    for g in report.groups_with(Priority::High).take(limit) {
        writeln!(out, "### .{}", g.class_name)?;
        writeln!(out, "- **Occurrences**: {}", g.occurrence_count())?;
        writeln!(out, "- **Files**: {}", g.files().join(", "))?;
        writeln!(out, "- **Property Sets**: {}", g.distinct_property_set_count)?;
        if let Some(sample) = sample_conflict(g) {
            writeln!(out, "- **Sample Conflict**: {sample}")?;
        }
        writeln!(out)?;
    }
    truncation_note(out, limit.min(total), total)
}

fn medium_priority_section(
    out: &mut String,
    report: &AnalysisReport,
    limit: usize,
) -> fmt::Result {
    writeln!(out, "## Medium Priority Conflicts (2 occurrences)")?;
    writeln!(out)?;
    let total = report.summary.medium_priority_conflicts;
    if total == 0 {
        writeln!(out, "None.")?;
        return writeln!(out);
    }
    for g in report.groups_with(Priority::Medium).take(limit) {
        let locations: Vec<String> = g
            .occurrences
            .iter()
            .map(|d| location(&d.source_file, d.source_line))
            .collect();
        writeln!(out, "### .{}", g.class_name)?;
        writeln!(out, "- **Occurrences**: {}", g.occurrence_count())?;
        writeln!(out, "- **Files**: {}", locations.join(" vs "))?;
        if let Some(sample) = sample_conflict(g) {
            writeln!(out, "- **Conflict**: {sample}")?;
        }
        writeln!(out)?;
    }
    truncation_note(out, limit.min(total), total)
}

fn harmless_section(out: &mut String, report: &AnalysisReport, limit: usize) -> fmt::Result {
    writeln!(out, "## Harmless Duplicates (identical properties)")?;
    writeln!(out)?;
    let total = report.summary.harmless_duplicates;
    if total == 0 {
        writeln!(out, "None.")?;
        return writeln!(out);
    }
    for g in report.groups_with(Priority::Harmless).take(limit) {
        writeln!(
            out,
            "- **.{}** ({} occurrences in {}) - Safe to consolidate",
            g.class_name,
            g.occurrence_count(),
            g.files().join(", ")
        )?;
    }
    writeln!(out)?;
    truncation_note(out, limit.min(total), total)
}

/// Render the human-readable summary document.
pub fn render_markdown(report: &AnalysisReport, limits: &MarkdownLimits) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let s = &report.summary;

    writeln!(out, "# CSS Duplicate Class Analysis Report")?;
    writeln!(out)?;
    writeln!(
        out,
        "**Analysis Date**: {}  ",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out, "**Root**: `{}`  ", report.root)?;
    writeln!(out, "**Files Analyzed**: {}  ", report.total_files)?;
    writeln!(out, "**Total Unique Classes**: {}  ", report.total_classes)?;
    writeln!(out, "**Classes with Duplicates**: {}  ", report.duplicate_classes())?;
    writeln!(out)?;

    writeln!(out, "## Summary")?;
    writeln!(out)?;
    writeln!(
        out,
        "- **High Priority Conflicts**: {} (3+ occurrences with conflicting properties)",
        s.high_priority_conflicts
    )?;
    writeln!(
        out,
        "- **Medium Priority Conflicts**: {} (2 occurrences with conflicting properties)",
        s.medium_priority_conflicts
    )?;
    writeln!(
        out,
        "- **Harmless Duplicates**: {} (identical properties)",
        s.harmless_duplicates
    )?;
    writeln!(
        out,
        "- **Total Duplicate Occurrences**: {}",
        s.total_occurrences
    )?;
    writeln!(out)?;

    writeln!(out, "## Files with Most Duplicates")?;
    writeln!(out)?;
    if s.files_with_most_duplicates.is_empty() {
        writeln!(out, "No duplicates found.")?;
    }
    for (i, f) in s.files_with_most_duplicates.iter().enumerate() {
        writeln!(
            out,
            "{}. **{}** - {} duplicates ({} conflicting)",
            i + 1,
            f.file,
            f.duplicate_count,
            f.conflicting_count
        )?;
    }
    writeln!(out)?;

    high_priority_section(&mut out, report, limits.high_priority)?;
    medium_priority_section(&mut out, report, limits.medium_priority)?;
    harmless_section(&mut out, report, limits.harmless)?;

    if !report.failures.is_empty() {
        writeln!(out, "## Files That Could Not Be Analyzed")?;
        writeln!(out)?;
        for f in &report.failures {
            let kind = match f.kind {
                FailureKind::Read => "read",
                FailureKind::Parse => "parse",
            };
            writeln!(out, "- `{}` ({kind} error): {}", f.file, f.message)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "---")?;
    writeln!(out)?;
    writeln!(out, "**Total Issues Found**: {}  ", report.duplicate_classes())?;
    writeln!(
        out,
        "**Recommended Action**: Focus on High Priority conflicts first, then Medium Priority, finally consolidate Harmless duplicates."
    )?;

    Ok(out)
}

#[cfg(test)]
#[path = "markdown_test.rs"]
mod tests;
