use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::parser::{Rule, StyleRule};

/// A `.` followed by word or hyphen characters. Compound selectors such as
/// `.icon.dropdown-trigger` yield one match per class.
static CLASS_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.([A-Za-z0-9_-]+)").expect("class token pattern is valid"));

/// One occurrence of a class name in one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDefinition {
    pub class_name: String,
    /// Full selector the class was found in.
    pub selector: String,
    /// `"property: value"` strings, sorted so definitions compare by content.
    pub properties: Vec<String>,
    pub source_file: String,
    pub source_line: Option<usize>,
    /// Prelude of the innermost conditional group, e.g. `(max-width: 767px)`.
    pub enclosing_conditional: Option<String>,
}

impl ClassDefinition {
    /// Two definitions are identical when their sorted property lists match.
    pub fn same_properties(&self, other: &ClassDefinition) -> bool {
        self.properties == other.properties
    }
}

/// Every class token in a single selector, in order of appearance.
pub fn class_tokens(selector: &str) -> impl Iterator<Item = &str> {
    CLASS_TOKEN
        .captures_iter(selector)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Render a rule body as sorted `"property: value"` strings. Repeated
/// declarations are kept.
fn sorted_properties(rule: &StyleRule) -> Vec<String> {
    let mut properties: Vec<String> = rule
        .declarations
        .iter()
        .map(|d| format!("{}: {}", d.property, d.value))
        .collect();
    properties.sort();
    properties
}

fn collect(
    rules: &[Rule],
    conditional: Option<&str>,
    source_file: &str,
    out: &mut Vec<ClassDefinition>,
) {
    for rule in rules {
        match rule {
            Rule::Style(style) => {
                let properties = sorted_properties(style);
                for selector in &style.selectors {
                    for class_name in class_tokens(selector) {
                        out.push(ClassDefinition {
                            class_name: class_name.to_string(),
                            selector: selector.clone(),
                            properties: properties.clone(),
                            source_file: source_file.to_string(),
                            source_line: Some(style.line),
                            enclosing_conditional: conditional.map(str::to_string),
                        });
                    }
                }
            }
            Rule::Conditional(group) => {
                collect(&group.rules, Some(&group.prelude), source_file, out);
            }
        }
    }
}

/// Flatten a parsed rule tree into class definitions, threading the prelude
/// of each conditional group down to the rules it contains.
pub fn extract_class_definitions(rules: &[Rule], source_file: &str) -> Vec<ClassDefinition> {
    let mut definitions = Vec::new();
    collect(rules, None, source_file, &mut definitions);
    definitions
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
