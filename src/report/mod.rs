//! Report building and rendering.
//!
//! `builder` turns the pipeline outputs into an `AnalysisReport`; `json`,
//! `markdown` and `console` render it. Rendering never recomputes anything,
//! so the two written artifacts always agree.

/// Summary counts and file ranking.
mod builder;
/// Report data structures.
pub(crate) mod data;
/// Structured (JSON) rendering.
mod json;
/// Human-readable (Markdown) rendering.
mod markdown;
/// Boxed console summary.
mod console;

pub use builder::build_report;
pub use console::print_summary;
pub use data::*;
pub use json::format_json;
pub use markdown::render_markdown;
