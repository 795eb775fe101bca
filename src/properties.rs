//! Property entries of an individual and the recursive renderer that turns
//! them into a display tree.
//!
//! Backend records encode each property as a single-key JSON object. The
//! `relationship` key is special: its value carries the related
//! individual's name (`name_object`) and its own nested `properties`.
//! Entries are resolved into [`PropertyEntry`] once, at ingestion, so the
//! renderer never inspects raw JSON shapes.

use serde::Serialize;
use serde_json::{Number, Value};
use thiserror::Error;

/// Deepest nesting level the renderer accepts before reporting malformed data.
pub const MAX_PROPERTY_DEPTH: usize = 32;

const RELATIONSHIP_KEY: &str = "relationship";

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyEntry {
    Scalar {
        key: String,
        value: Value,
    },
    Relationship {
        iri: Option<String>,
        target_name: String,
        children: Vec<PropertyEntry>,
    },
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyNode {
    Field {
        label: String,
        value: String,
        depth: usize,
    },
    Relation {
        label: String,
        depth: usize,
        children: Vec<PropertyNode>,
    },
}

impl PropertyNode {
    pub fn depth(&self) -> usize {
        match self {
            PropertyNode::Field { depth, .. } | PropertyNode::Relation { depth, .. } => *depth,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PropertyNode::Field { label, .. } | PropertyNode::Relation { label, .. } => label,
        }
    }
}

#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PropertyError {
    #[error("malformed data: relationship nesting exceeds {limit} levels")]
    TooDeep { limit: usize },
}

/// Resolves a backend `properties` array. Anything that is not an array
/// yields no entries; entries without a key are dropped.
pub fn ingest_entries(value: &Value) -> Vec<PropertyEntry> {
    match value {
        Value::Array(items) => items.iter().filter_map(ingest_entry).collect(),
        _ => Vec::new(),
    }
}

fn ingest_entry(value: &Value) -> Option<PropertyEntry> {
    let (key, value) = value.as_object()?.iter().next()?;
    if key == RELATIONSHIP_KEY && is_truthy(value) {
        let target_name = value
            .get("name_object")
            .map(format_value)
            .unwrap_or_default();
        let iri = value
            .get("iri")
            .and_then(Value::as_str)
            .map(str::to_string);
        let children = value
            .get("properties")
            .map(ingest_entries)
            .unwrap_or_default();
        return Some(PropertyEntry::Relationship {
            iri,
            target_name,
            children,
        });
    }
    Some(PropertyEntry::Scalar {
        key: key.clone(),
        value: value.clone(),
    })
}

/// Renders `entries` starting at `depth`. Each nested relationship is
/// rendered one level deeper than its parent. Relationships repeating the
/// same property or an empty target name are legitimate; only nesting past
/// [`MAX_PROPERTY_DEPTH`] is rejected.
pub fn render_properties(
    entries: &[PropertyEntry],
    depth: usize,
) -> Result<Vec<PropertyNode>, PropertyError> {
    if depth > MAX_PROPERTY_DEPTH {
        return Err(PropertyError::TooDeep {
            limit: MAX_PROPERTY_DEPTH,
        });
    }
    let mut nodes = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            PropertyEntry::Scalar { key, value } => nodes.push(PropertyNode::Field {
                label: format_label(key),
                value: format_value(value),
                depth,
            }),
            PropertyEntry::Relationship {
                target_name,
                children,
                ..
            } => nodes.push(PropertyNode::Relation {
                label: target_name.clone(),
                depth,
                children: render_properties(children, depth + 1)?,
            }),
        }
    }
    Ok(nodes)
}

/// `"tiene_sintoma"` -> `"Tiene Sintoma"`.
pub fn format_label(text: &str) -> String {
    let mut label = String::with_capacity(text.len());
    let mut previous_is_word = false;
    for ch in text.chars().map(|ch| if ch == '_' { ' ' } else { ch }) {
        let is_word = ch.is_alphanumeric();
        if is_word && !previous_is_word {
            label.extend(ch.to_uppercase());
        } else {
            label.push(ch);
        }
        previous_is_word = is_word;
    }
    label
}

/// Display string for a property value: lists are comma-joined, keyed
/// structures are space-joined by value, null is blank.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Array(items) => items.iter().map(element_text).collect::<Vec<_>>().join(", "),
        Value::Object(map) => map.values().map(element_text).collect::<Vec<_>>().join(" "),
        other => element_text(other),
    }
}

fn element_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Number(number) => number_text(number),
        Value::Bool(flag) => flag.to_string(),
        Value::Array(items) => items.iter().map(element_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object]".to_string(),
    }
}

/// Floats print the shortest form, so `1.0` reads `1` and `2.5` reads `2.5`.
fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() => float.to_string(),
        _ => number.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_value_follows_display_rules() {
        assert_eq!(format_value(&json!(["a", "b"])), "a, b");
        assert_eq!(format_value(&Value::Null), "");
        assert_eq!(format_value(&json!({ "x": 1, "y": 2 })), "1 2");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!("plain")), "plain");
        assert_eq!(format_value(&json!([1, null, "c"])), "1, , c");
    }

    #[test]
    fn format_label_capitalizes_words() {
        assert_eq!(format_label("x_y"), "X Y");
        assert_eq!(format_label("tiene_sintoma"), "Tiene Sintoma");
        assert_eq!(format_label("síntoma_común"), "Síntoma Común");
        assert_eq!(format_label(""), "");
    }

    #[test]
    fn renders_scalars_and_nested_relationships() {
        let entries = ingest_entries(&json!([
            { "name": "x_y" },
            { "relationship": { "name_object": "Parent", "properties": [{ "name": "child" }] } }
        ]));
        let nodes = render_properties(&entries, 0).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(
            nodes[0],
            PropertyNode::Field {
                label: "Name".to_string(),
                value: "x_y".to_string(),
                depth: 0,
            }
        );
        match &nodes[1] {
            PropertyNode::Relation {
                label,
                depth,
                children,
            } => {
                assert_eq!(label, "Parent");
                assert_eq!(children.len(), 1);
                assert_eq!(children[0].label(), "Name");
                assert_eq!(children[0].depth(), depth + 1);
            }
            other => panic!("expected relation, got {other:?}"),
        }
    }

    #[test]
    fn ingestion_drops_empty_entries_and_keeps_first_key() {
        let entries = ingest_entries(&json!([{}, "loose", { "a": 1, "b": 2 }]));
        assert_eq!(
            entries,
            vec![PropertyEntry::Scalar {
                key: "a".to_string(),
                value: json!(1),
            }]
        );
        assert!(ingest_entries(&json!({ "not": "a list" })).is_empty());
    }

    #[test]
    fn null_relationship_is_rendered_as_field() {
        let entries = ingest_entries(&json!([{ "relationship": null }]));
        let nodes = render_properties(&entries, 0).unwrap();
        assert_eq!(
            nodes,
            vec![PropertyNode::Field {
                label: "Relationship".to_string(),
                value: String::new(),
                depth: 0,
            }]
        );
    }

    #[test]
    fn rendering_is_repeatable() {
        let entries = ingest_entries(&json!([
            { "relationship": { "name_object": ["A", "B"], "properties": [{ "k": "v" }] } }
        ]));
        let first = render_properties(&entries, 0).unwrap();
        let second = render_properties(&entries, 0).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0].label(), "A, B");
    }

    fn chain(depth: usize) -> PropertyEntry {
        let mut entry = PropertyEntry::Scalar {
            key: "leaf".to_string(),
            value: json!("end"),
        };
        for level in 0..depth {
            entry = PropertyEntry::Relationship {
                iri: Some(format!("urn:rel:{level}")),
                target_name: format!("Level {level}"),
                children: vec![entry],
            };
        }
        entry
    }

    #[test]
    fn depth_ceiling_reports_malformed_data() {
        assert!(render_properties(&[chain(MAX_PROPERTY_DEPTH)], 0).is_ok());
        assert_eq!(
            render_properties(&[chain(MAX_PROPERTY_DEPTH + 1)], 0),
            Err(PropertyError::TooDeep {
                limit: MAX_PROPERTY_DEPTH
            })
        );
    }

    #[test]
    fn repeated_unnamed_relationships_render_as_a_tree() {
        let entries = ingest_entries(&json!([
            { "relationship": {
                "iri": "urn:p#parte_de",
                "name_object": "",
                "properties": [
                    { "relationship": {
                        "iri": "urn:p#parte_de",
                        "name_object": "",
                        "properties": [{ "color": "rojo" }]
                    } }
                ]
            } }
        ]));
        let nodes = render_properties(&entries, 0).unwrap();
        let PropertyNode::Relation { children, .. } = &nodes[0] else {
            panic!("expected relation, got {:?}", nodes[0]);
        };
        let PropertyNode::Relation { label, depth, children } = &children[0] else {
            panic!("expected nested relation, got {:?}", children[0]);
        };
        assert_eq!(label, "");
        assert_eq!(*depth, 1);
        assert_eq!(
            children[0],
            PropertyNode::Field {
                label: "Color".to_string(),
                value: "rojo".to_string(),
                depth: 2,
            }
        );
    }

    #[test]
    fn float_values_drop_integral_fraction() {
        assert_eq!(format_value(&json!(1.0)), "1");
        assert_eq!(format_value(&json!(2.5)), "2.5");
        assert_eq!(format_value(&json!([3.0, 7])), "3, 7");
        assert_eq!(format_value(&json!(-12)), "-12");
    }
}
