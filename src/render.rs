use crate::model::{ResultGroups, ResultItem};
use crate::{Locale, encode_component};
use serde::Serialize;

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", content = "href", rename_all = "snake_case")]
pub enum ItemLink {
    /// DBPedia resource, opened in place.
    External(String),
    /// Route to the individual page of this front end.
    Internal(String),
}

impl ItemLink {
    pub fn href(&self) -> &str {
        match self {
            ItemLink::External(href) | ItemLink::Internal(href) => href,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, ItemLink::External(_))
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct ItemView {
    pub name: String,
    pub link: ItemLink,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct GroupView {
    pub title: String,
    pub count: usize,
    pub items: Vec<ItemView>,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct ResultsView {
    pub groups: Vec<GroupView>,
}

impl ResultsView {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// True for `http…` identifiers that point into `dbpedia.org`, ignoring case.
pub fn is_external(iri: &str) -> bool {
    let lowered = iri.to_lowercase();
    lowered.starts_with("http") && lowered.contains("dbpedia.org")
}

pub fn individual_path(locale: Locale, class_name: &str, iri: &str) -> String {
    format!(
        "/{}/class/{}/individual/{}",
        locale.code(),
        encode_component(class_name),
        encode_component(iri)
    )
}

pub fn search_path(locale: Locale) -> String {
    format!("/{}", locale.code())
}

pub fn classify(locale: Locale, group_label: &str, item: &ResultItem) -> ItemLink {
    if is_external(&item.iri) {
        ItemLink::External(item.iri.clone())
    } else {
        ItemLink::Internal(individual_path(locale, group_label, &item.iri))
    }
}

/// Builds the display tree for a set of groups. Pure: no I/O, no state.
pub fn render(groups: &ResultGroups, locale: Locale) -> ResultsView {
    let groups = groups
        .iter()
        .map(|group| GroupView {
            title: group.label.clone(),
            count: group.items.len(),
            items: group
                .items
                .iter()
                .map(|item| ItemView {
                    name: item.name.clone(),
                    link: classify(locale, &group.label, item),
                    summary: item.summary.clone(),
                })
                .collect(),
        })
        .collect();
    ResultsView { groups }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(iri: &str, name: &str) -> ResultItem {
        ResultItem {
            iri: iri.to_string(),
            name: name.to_string(),
            summary: None,
        }
    }

    #[test]
    fn link_classification() {
        assert!(is_external("http://dbpedia.org/resource/X"));
        assert!(is_external("HTTPS://DBpedia.ORG/resource/X"));
        assert!(!is_external("http://example.com/onto#X"));
        assert!(!is_external(""));
        assert!(!is_external("urn:dbpedia.org:x"));
    }

    #[test]
    fn internal_links_encode_class_and_iri() {
        let link = classify(
            Locale::Pt,
            "ontology.owx.Disease",
            &item("http://example.com/onto#Gripe", "Gripe"),
        );
        assert_eq!(
            link,
            ItemLink::Internal(
                "/pt/class/ontology.owx.Disease/individual/http%3A%2F%2Fexample.com%2Fonto%23Gripe"
                    .to_string()
            )
        );
    }

    #[test]
    fn render_counts_items_and_is_repeatable() {
        let mut groups = ResultGroups::new();
        groups.push(
            "Enfermedad",
            vec![
                item("http://dbpedia.org/resource/Flu", "Flu"),
                item("urn:onto#Tos", "Tos"),
            ],
        );
        groups.push("Vacio", Vec::new());

        let view = render(&groups, Locale::Es);
        assert_eq!(view.groups.len(), 2);
        assert_eq!(view.groups[0].count, 2);
        assert!(view.groups[0].items[0].link.is_external());
        assert_eq!(
            view.groups[0].items[1].link.href(),
            "/es/class/Enfermedad/individual/urn%3Aonto%23Tos"
        );
        assert_eq!(view.groups[1].count, 0);
        assert_eq!(view, render(&groups, Locale::Es));
    }
}
