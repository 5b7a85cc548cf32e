use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::css::ClassDefinition;

/// Maximum property conflicts recorded per duplicate group.
pub const DEFAULT_CONFLICT_LIMIT: usize = 3;

/// Priority bucket of a duplicate group.
/// - `High`: conflicting definitions, 3+ occurrences.
/// - `Medium`: conflicting definitions, exactly 2 occurrences.
/// - `Harmless`: every definition has the same declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Harmless,
}

/// One property declared with different values by two definitions of the
/// same class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyConflict {
    pub property: String,
    pub value_in_first: String,
    pub value_in_second: String,
    pub first_file: String,
    pub first_selector: String,
    pub first_line: Option<usize>,
    pub second_file: String,
    pub second_selector: String,
    pub second_line: Option<usize>,
}

/// All definitions sharing one class name. Only built for 2+ occurrences.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    pub class_name: String,
    pub occurrences: Vec<ClassDefinition>, // discovery order
    pub distinct_property_set_count: usize,
    pub is_conflicting: bool,
    pub conflicts: Vec<PropertyConflict>,
}

impl DuplicateGroup {
    pub fn occurrence_count(&self) -> usize {
        self.occurrences.len()
    }

    pub fn priority(&self) -> Priority {
        match (self.is_conflicting, self.occurrence_count()) {
            (true, n) if n >= 3 => Priority::High,
            (true, _) => Priority::Medium,
            (false, _) => Priority::Harmless,
        }
    }

    /// Source files contributing to this group, first-seen order, no repeats.
    pub fn files(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.occurrences
            .iter()
            .map(|d| d.source_file.as_str())
            .filter(|f| seen.insert(*f))
            .collect()
    }
}

/// Group definitions by class name, keeping buckets in the order each class
/// was first seen and definitions in discovery order within a bucket.
fn group_by_class(definitions: &[ClassDefinition]) -> Vec<Vec<&ClassDefinition>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<Vec<&ClassDefinition>> = Vec::new();

    for def in definitions {
        let slot = *index.entry(def.class_name.as_str()).or_insert_with(|| {
            buckets.push(Vec::new());
            buckets.len() - 1
        });
        buckets[slot].push(def);
    }
    buckets
}

/// Split a `"property: value"` string built by the extractor.
fn split_property(entry: &str) -> (&str, &str) {
    entry.split_once(": ").unwrap_or((entry, ""))
}

/// Property name to value, in order of first appearance. A repeated property
/// keeps its first position but takes the last value.
fn property_map(properties: &[String]) -> Vec<(&str, &str)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut map: Vec<(&str, &str)> = Vec::new();
    for entry in properties {
        let (name, value) = split_property(entry);
        match positions.get(name) {
            Some(&i) => map[i].1 = value,
            None => {
                positions.insert(name, map.len());
                map.push((name, value));
            }
        }
    }
    map
}

/// Properties declared by both definitions with different values. Properties
/// only one side declares, and shared properties with equal values, are not
/// conflicts.
pub fn find_property_conflicts(
    first: &ClassDefinition,
    second: &ClassDefinition,
) -> Vec<PropertyConflict> {
    if first.same_properties(second) {
        return Vec::new();
    }

    let second_values: HashMap<&str, &str> =
        property_map(&second.properties).into_iter().collect();

    property_map(&first.properties)
        .into_iter()
        .filter_map(|(property, value)| {
            let other = second_values.get(property)?;
            (value != *other).then(|| PropertyConflict {
                property: property.to_string(),
                value_in_first: value.to_string(),
                value_in_second: other.to_string(),
                first_file: first.source_file.clone(),
                first_selector: first.selector.clone(),
                first_line: first.source_line,
                second_file: second.source_file.clone(),
                second_selector: second.selector.clone(),
                second_line: second.source_line,
            })
        })
        .collect()
}

/// Compare every unordered pair of definitions in discovery order and keep
/// the first `limit` conflicts found.
fn collect_conflicts(occurrences: &[&ClassDefinition], limit: usize) -> Vec<PropertyConflict> {
    let mut conflicts = Vec::new();
    'pairs: for (i, first) in occurrences.iter().enumerate() {
        for second in &occurrences[i + 1..] {
            for conflict in find_property_conflicts(first, second) {
                if conflicts.len() >= limit {
                    break 'pairs;
                }
                conflicts.push(conflict);
            }
        }
    }
    conflicts
}

fn build_group(bucket: &[&ClassDefinition], conflict_limit: usize) -> DuplicateGroup {
    let distinct: HashSet<&[String]> = bucket.iter().map(|d| d.properties.as_slice()).collect();

    DuplicateGroup {
        class_name: bucket[0].class_name.clone(),
        occurrences: bucket.iter().map(|d| (*d).clone()).collect(),
        distinct_property_set_count: distinct.len(),
        is_conflicting: distinct.len() > 1,
        conflicts: collect_conflicts(bucket, conflict_limit),
    }
}

/// Find every class defined more than once and classify its definitions.
///
/// Definitions are identical only when their sorted `"property: value"`
/// lists match byte for byte: `margin: 0` and `margin: 0px` differ.
/// Groups are returned by occurrence count, highest first; ties keep the
/// order in which the class was first seen.
pub fn detect_duplicates(
    definitions: &[ClassDefinition],
    conflict_limit: usize,
) -> Vec<DuplicateGroup> {
    let mut groups: Vec<DuplicateGroup> = group_by_class(definitions)
        .into_iter()
        .filter(|bucket| bucket.len() > 1)
        .map(|bucket| build_group(&bucket, conflict_limit))
        .collect();

    groups.sort_by(|a, b| b.occurrence_count().cmp(&a.occurrence_count()));
    groups
}

/// Number of distinct class names among all definitions.
pub fn count_unique_classes(definitions: &[ClassDefinition]) -> usize {
    definitions
        .iter()
        .map(|d| d.class_name.as_str())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
#[path = "detector_test.rs"]
mod tests;
