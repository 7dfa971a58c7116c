//! Reference extractor: which items are referenced, and by what name

use log::{debug, warn};
use std::collections::{HashMap, HashSet};

use super::models::{Item, ReferenceField, UsageMap};

/// Collect every item referenced through `fields` on any of `items`.
///
/// Display names are looked up in `items`. A referenced codename with no
/// matching item (an item outside the fetched set, or a component) is left
/// out of the map and logged.
pub fn extract(fields: &[ReferenceField], items: &[Item]) -> UsageMap {
    let names: HashMap<&str, &str> = items
        .iter()
        .map(|item| (item.codename.as_str(), item.name.as_str()))
        .collect();

    let mut usage = UsageMap::new();
    let mut unresolved: HashSet<&str> = HashSet::new();

    for item in items {
        for field in fields.iter().filter(|field| field.applies_to(item)) {
            let Some(payload) = item.field_values.get(&field.codename) else {
                continue;
            };

            for codename in payload.referenced_codenames() {
                if usage.contains(codename) {
                    continue;
                }
                match names.get(codename.as_str()) {
                    Some(name) => {
                        usage.insert(codename, name);
                    }
                    None => {
                        if unresolved.insert(codename.as_str()) {
                            warn!(
                                "'{}' references '{}' through {}.{}, but no such item was fetched",
                                item.codename, codename, field.type_codename, field.codename
                            );
                        }
                    }
                }
            }
        }
    }

    debug!(
        "Extracted {} referenced items ({} unresolved references)",
        usage.len(),
        unresolved.len()
    );
    usage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::usage::models::{EncodingKind, FieldPayload, RichTextDocument};
    use pretty_assertions::assert_eq;

    fn field(type_codename: &str, codename: &str, encoding: EncodingKind) -> ReferenceField {
        ReferenceField {
            codename: codename.to_string(),
            name: codename.to_string(),
            type_codename: type_codename.to_string(),
            type_name: type_codename.to_string(),
            encoding,
        }
    }

    fn item(codename: &str, type_codename: &str, values: Vec<(&str, FieldPayload)>) -> Item {
        Item {
            codename: codename.to_string(),
            name: format!("{} name", codename),
            type_codename: type_codename.to_string(),
            field_values: values
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    fn links(codenames: &[&str]) -> FieldPayload {
        FieldPayload::Links(codenames.iter().map(|c| c.to_string()).collect())
    }

    fn rich_text(linked: &[&str]) -> FieldPayload {
        FieldPayload::RichText(RichTextDocument {
            html: "<p></p>".to_string(),
            linked_items: linked.iter().map(|c| c.to_string()).collect(),
        })
    }

    fn keys(usage: &UsageMap) -> Vec<&str> {
        usage.codenames().collect()
    }

    #[test]
    fn test_link_and_rich_text_references() {
        let fields = vec![
            field("article", "related", EncodingKind::Link),
            field("page", "body", EncodingKind::RichText),
        ];
        let items = vec![
            item("a", "article", vec![("related", links(&["b"]))]),
            item("b", "article", vec![("related", links(&[]))]),
            item("c", "page", vec![("body", rich_text(&["b"]))]),
        ];

        let usage = extract(&fields, &items);
        assert_eq!(keys(&usage), vec!["b"]);
        assert_eq!(usage.get("b"), Some("b name"));
    }

    #[test]
    fn test_duplicate_references_counted_once() {
        let fields = vec![
            field("article", "related", EncodingKind::Link),
            field("article", "body", EncodingKind::RichText),
        ];
        let items = vec![
            item(
                "a",
                "article",
                vec![("related", links(&["b", "b"])), ("body", rich_text(&["b"]))],
            ),
            item("b", "article", vec![("related", links(&["a"]))]),
        ];

        let usage = extract(&fields, &items);
        assert_eq!(keys(&usage), vec!["a", "b"]);
    }

    #[test]
    fn test_self_reference_counts() {
        let fields = vec![field("article", "related", EncodingKind::Link)];
        let items = vec![item("a", "article", vec![("related", links(&["a"]))])];

        assert_eq!(keys(&extract(&fields, &items)), vec!["a"]);
    }

    #[test]
    fn test_unresolved_reference_is_skipped() {
        let fields = vec![field("article", "body", EncodingKind::RichText)];
        let items = vec![item(
            "a",
            "article",
            vec![("body", rich_text(&["n2f4ac63_inline_component", "a"]))],
        )];

        let usage = extract(&fields, &items);
        assert_eq!(keys(&usage), vec!["a"]);
    }

    #[test]
    fn test_field_present_on_other_type_is_inspected() {
        let fields = vec![field("article", "related", EncodingKind::Link)];
        let items = vec![
            item("cafe", "cafe", vec![("related", links(&["b"]))]),
            item("b", "article", vec![]),
        ];

        assert_eq!(keys(&extract(&fields, &items)), vec!["b"]);
    }

    #[test]
    fn test_fields_outside_catalog_are_ignored() {
        let fields = vec![field("article", "related", EncodingKind::Link)];
        let items = vec![
            item("a", "article", vec![("other_links", links(&["b"]))]),
            item("b", "article", vec![]),
        ];

        assert!(extract(&fields, &items).is_empty());
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let fields = vec![
            field("article", "related", EncodingKind::Link),
            field("article", "body", EncodingKind::RichText),
        ];
        let items = vec![
            item("a", "article", vec![("related", links(&["c", "b"]))]),
            item("b", "article", vec![("body", rich_text(&["a"]))]),
            item("c", "article", vec![]),
        ];

        let first = extract(&fields, &items);
        let second = extract(&fields, &items);
        assert_eq!(first, second);

        let mut reversed = items.clone();
        reversed.reverse();
        assert_eq!(extract(&fields, &reversed), first);
    }
}
