//! Delivery API models
//!
//! Wire structures as returned by the `/types` and `/items` endpoints, plus the
//! flattened shapes handed to the usage services.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use super::query::PageCursor;

/// `system` block shared by content types and content items
#[derive(Debug, Clone, Deserialize)]
pub struct SystemAttributes {
    pub name: String,
    pub codename: String,
    /// Content type codename; only present on items
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,
}

/// Paging block of list responses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub count: u64,
    /// Absolute URL of the next page; empty on the last page
    #[serde(default)]
    pub next_page: String,
}

impl Pagination {
    pub fn next_cursor(&self) -> Option<PageCursor> {
        PageCursor::from_next_page(&self.next_page)
    }
}

/// Response of `GET /{project}/types`
#[derive(Debug, Clone, Deserialize)]
pub struct TypesResponse {
    #[serde(default)]
    pub types: Vec<ContentTypeResponse>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentTypeResponse {
    pub system: SystemAttributes,
    /// Element definitions keyed by codename, in declaration order
    #[serde(default)]
    pub elements: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct TypeElementResponse {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: String,
}

/// Response of `GET /{project}/items`
#[derive(Debug, Clone, Deserialize)]
pub struct ItemsResponse {
    #[serde(default)]
    pub items: Vec<ItemResponse>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemResponse {
    pub system: SystemAttributes,
    #[serde(default)]
    pub elements: HashMap<String, RawElement>,
}

/// One element value on an item, still in wire form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawElement {
    /// Declared element type tag (e.g. "modular_content", "rich_text", "text")
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: Value,
    /// Rich text only: codenames of items embedded in the document
    #[serde(default)]
    pub modular_content: Vec<String>,
}

/// Content type with its element declarations
#[derive(Debug, Clone, PartialEq)]
pub struct ContentType {
    pub codename: String,
    pub name: String,
    pub elements: Vec<TypeElement>,
}

/// Element declaration on a content type
#[derive(Debug, Clone, PartialEq)]
pub struct TypeElement {
    pub codename: String,
    pub name: String,
    /// Declared kind string as reported by the API
    pub kind: String,
}

/// Content item as delivered, before payload parsing
#[derive(Debug, Clone, PartialEq)]
pub struct RawItem {
    pub codename: String,
    pub name: String,
    pub type_codename: String,
    pub elements: HashMap<String, RawElement>,
}

/// One page of items plus the cursor of the following page
#[derive(Debug, Clone, Default)]
pub struct ItemsPage {
    pub items: Vec<RawItem>,
    pub next: Option<PageCursor>,
}

impl ContentTypeResponse {
    /// Flatten into a `ContentType`, keeping element declaration order.
    pub fn into_content_type(self) -> serde_json::Result<ContentType> {
        let mut elements = Vec::with_capacity(self.elements.len());
        for (codename, definition) in self.elements {
            let element: TypeElementResponse = serde_json::from_value(definition)?;
            elements.push(TypeElement {
                codename,
                name: element.name,
                kind: element.kind,
            });
        }

        Ok(ContentType {
            codename: self.system.codename,
            name: self.system.name,
            elements,
        })
    }
}

impl From<ItemResponse> for RawItem {
    fn from(item: ItemResponse) -> Self {
        Self {
            codename: item.system.codename,
            name: item.system.name,
            type_codename: item.system.content_type.unwrap_or_default(),
            elements: item.elements,
        }
    }
}

impl From<ItemsResponse> for ItemsPage {
    fn from(response: ItemsResponse) -> Self {
        let next = response.pagination.next_cursor();
        Self {
            items: response.items.into_iter().map(RawItem::from).collect(),
            next,
        }
    }
}
