//! Item paginator: drains every page of the item listing

use log::{debug, info};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

use super::models::{EncodingKind, FieldPayload, Item, ReferenceField, RichTextDocument};
use super::schema::projection;
use crate::api::{ContentSource, PageCursor, RawElement, RawItem};
use crate::error::{Result, UsageError};

/// Fetch every item, projected to the reference fields, in delivery order.
///
/// Pages are requested one after another until the source reports no next
/// page. Any failure aborts the whole fetch, as does a cursor that was already
/// followed. An item delivered twice is kept once, at its first position.
pub async fn fetch_all<S: ContentSource + ?Sized>(
    source: &S,
    fields: &[ReferenceField],
) -> Result<Vec<Item>> {
    let projected = projection(fields);
    let encodings = EncodingLookup::new(fields);

    let mut items = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut followed: HashSet<String> = HashSet::new();
    let mut cursor: Option<PageCursor> = None;
    let mut pages = 0usize;

    loop {
        let page = source.get_items_page(&projected, cursor.as_ref()).await?;
        pages += 1;
        debug!("Items page {}: {} items", pages, page.items.len());

        for raw in page.items {
            if !seen.insert(raw.codename.clone()) {
                debug!("Skipping duplicate delivery of {}", raw.codename);
                continue;
            }
            items.push(encodings.parse_item(raw));
        }

        match page.next {
            Some(next) if !followed.insert(next.to_string()) => {
                return Err(UsageError::StalledPagination(next.to_string()));
            }
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    info!("Fetched {} items in {} pages", items.len(), pages);
    Ok(items)
}

/// Encoding of each (type, field) pair, decided by the schema scan
struct EncodingLookup<'a> {
    by_owner: HashMap<&'a str, HashMap<&'a str, EncodingKind>>,
}

impl<'a> EncodingLookup<'a> {
    fn new(fields: &'a [ReferenceField]) -> Self {
        let mut by_owner: HashMap<&'a str, HashMap<&'a str, EncodingKind>> = HashMap::new();
        for field in fields {
            by_owner
                .entry(field.type_codename.as_str())
                .or_default()
                .insert(field.codename.as_str(), field.encoding);
        }
        Self { by_owner }
    }

    /// Scanned encoding for the field, else the element's own type tag
    fn encoding_for(
        &self,
        type_codename: &str,
        element_codename: &str,
        element: &RawElement,
    ) -> Option<EncodingKind> {
        self.by_owner
            .get(type_codename)
            .and_then(|fields| fields.get(element_codename))
            .copied()
            .or_else(|| EncodingKind::from_kind(&element.kind))
    }

    fn parse_item(&self, raw: RawItem) -> Item {
        let RawItem {
            codename,
            name,
            type_codename,
            elements,
        } = raw;

        let field_values = elements
            .into_iter()
            .map(|(element_codename, element)| {
                let encoding = self.encoding_for(&type_codename, &element_codename, &element);
                let payload = parse_payload(encoding, element);
                (element_codename, payload)
            })
            .collect();

        Item {
            codename,
            name,
            type_codename,
            field_values,
        }
    }
}

fn parse_payload(encoding: Option<EncodingKind>, element: RawElement) -> FieldPayload {
    match encoding {
        Some(EncodingKind::Link) => FieldPayload::Links(codename_list(&element.value)),
        Some(EncodingKind::RichText) => FieldPayload::RichText(RichTextDocument {
            html: element.value.as_str().unwrap_or_default().to_string(),
            linked_items: element.modular_content,
        }),
        None => FieldPayload::Other,
    }
}

fn codename_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(entries) => entries
            .iter()
            .filter_map(|entry| entry.as_str().map(str::to_string))
            .collect(),
        Value::Null => Vec::new(),
        other => {
            debug!("Linked items value is not a list: {}", other);
            Vec::new()
        }
    }
}
