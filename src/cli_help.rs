//! Long help text for the command line.
//!
//! Kept apart from `cli.rs` so the argument definitions stay short.

/// Shown by `cssdup --help`.
pub const CSSDUP: &str = "\
Find CSS class names defined more than once across a directory of
stylesheets, and flag the ones whose definitions disagree.

Every `.css` file under PATH is parsed (hidden and git-ignored files
included, `.backup` files skipped). Each class token in each selector
produces one definition. Definitions sharing a class name form a
duplicate group, bucketed by priority:

  high      conflicting properties, 3+ occurrences
  medium    conflicting properties, exactly 2 occurrences
  harmless  identical properties, safe to consolidate

Two artifacts are written: a JSON report (css-duplicate-analysis.json)
and a Markdown summary (CSS-DUPLICATE-ANALYSIS.md). Settings can also
come from cssdup.toml in the working directory; command-line flags win.

Files that fail to parse are listed in the report and do not stop the
run. Exit status is 1 only when the root is unusable or a report
cannot be written.";
