/// Stylesheet parsing and class extraction.
///
/// `parser` turns stylesheet text into a rule tree; `extract` flattens that
/// tree into one `ClassDefinition` per class token per selector.
mod extract;
mod parser;

pub use extract::{ClassDefinition, extract_class_definitions};
pub use parser::{ParseError, parse_stylesheet};

/// Parse stylesheet text and extract every class definition in it.
pub fn analyze_stylesheet(src: &str, source_file: &str) -> Result<Vec<ClassDefinition>, ParseError> {
    let rules = parse_stylesheet(src)?;
    Ok(extract_class_definitions(&rules, source_file))
}

#[cfg(test)]
mod tests {
    use super::parser::ParseErrorKind;
    use super::*;

    #[test]
    fn analyze_stylesheet_end_to_end() {
        let css = ".btn, .link { color: blue }\n@media print { .btn { color: black } }";
        let defs = analyze_stylesheet(css, "main.css").unwrap();
        let names: Vec<&str> = defs.iter().map(|d| d.class_name.as_str()).collect();
        assert_eq!(names, vec!["btn", "link", "btn"]);
        assert_eq!(defs[2].enclosing_conditional.as_deref(), Some("print"));
        assert!(defs.iter().all(|d| d.source_file == "main.css"));
    }

    #[test]
    fn analyze_stylesheet_propagates_parse_errors() {
        let err = analyze_stylesheet(".btn { color: blue }\n}", "broken.css").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedCloseBrace);
    }
}
