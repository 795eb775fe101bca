use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Backend path used to answer a search.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Combined,
    #[default]
    Online,
    Offline,
}

impl SearchMode {
    pub const ALL: [SearchMode; 3] = [SearchMode::Combined, SearchMode::Online, SearchMode::Offline];

    pub fn query_value(&self) -> &'static str {
        match self {
            SearchMode::Combined => "combined",
            SearchMode::Online => "online",
            SearchMode::Offline => "offline",
        }
    }

    pub fn from_query_value(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.query_value().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Combined => write!(f, "Combined"),
            SearchMode::Online => write!(f, "Online"),
            SearchMode::Offline => write!(f, "Offline"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    pub iri: String,
    pub name: String,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl ResultItem {
    /// Reads `iri`/`name`/`abstract` from a backend record. Missing or
    /// non-string fields become blank instead of failing the whole group.
    pub fn from_value(value: &Value) -> Self {
        Self {
            iri: string_field(value, "iri").unwrap_or_default(),
            name: string_field(value, "name").unwrap_or_default(),
            summary: string_field(value, "abstract").filter(|text| !text.trim().is_empty()),
        }
    }
}

/// A category label and its items, in backend order.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResultGroup {
    pub label: String,
    pub items: Vec<ResultItem>,
}

/// Canonical "category label -> items" structure shared by every search mode.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultGroups(Vec<ResultGroup>);

impl ResultGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(label: impl Into<String>, items: Vec<ResultItem>) -> Self {
        Self(vec![ResultGroup {
            label: label.into(),
            items,
        }])
    }

    /// Appends a group. Labels are opaque; duplicates are kept as separate groups.
    pub fn push(&mut self, label: impl Into<String>, items: Vec<ResultItem>) {
        self.0.push(ResultGroup {
            label: label.into(),
            items,
        });
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultGroup> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.0.iter().map(|group| group.items.len()).sum()
    }

    pub fn get(&self, label: &str) -> Option<&ResultGroup> {
        self.0.iter().find(|group| group.label == label)
    }
}

impl<'a> IntoIterator for &'a ResultGroups {
    type Item = &'a ResultGroup;
    type IntoIter = std::slice::Iter<'a, ResultGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// An ontology instance as returned by `/searchClass`.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub iri: String,
    pub name: String,
    pub properties: Vec<crate::properties::PropertyEntry>,
}

impl Individual {
    pub fn from_value(value: &Value) -> Self {
        let properties = value
            .get("properties")
            .map(crate::properties::ingest_entries)
            .unwrap_or_default();
        Self {
            iri: string_field(value, "iri").unwrap_or_default(),
            name: string_field(value, "name_individual").unwrap_or_default(),
            properties,
        }
    }
}

pub(crate) fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(text) => Some(text.clone()),
        Value::Null => None,
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!(SearchMode::from_query_value("OFFLINE"), Some(SearchMode::Offline));
        assert_eq!(SearchMode::from_query_value(" combined "), Some(SearchMode::Combined));
        assert_eq!(SearchMode::from_query_value("sparql"), None);
    }

    #[test]
    fn result_item_tolerates_missing_fields() {
        let item = ResultItem::from_value(&json!({ "name": "Flu" }));
        assert_eq!(item.iri, "");
        assert_eq!(item.name, "Flu");
        assert!(item.summary.is_none());

        let item = ResultItem::from_value(&json!("not an object"));
        assert_eq!(item.name, "");
    }

    #[test]
    fn groups_keep_insertion_order_and_duplicates() {
        let mut groups = ResultGroups::new();
        groups.push("Zeta", vec![]);
        groups.push("Alpha", vec![]);
        groups.push("Zeta", vec![]);
        let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, ["Zeta", "Alpha", "Zeta"]);
    }

    #[test]
    fn individual_reads_backend_record() {
        let individual = Individual::from_value(&json!({
            "iri": "urn:a",
            "name_individual": "Asthma",
            "properties": [{ "sintoma": "tos" }]
        }));
        assert_eq!(individual.iri, "urn:a");
        assert_eq!(individual.name, "Asthma");
        assert_eq!(individual.properties.len(), 1);
    }
}
