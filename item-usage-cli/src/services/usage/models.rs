//! Data model of the usage pipeline

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Element kind string of linked-items fields
pub const LINKED_ITEMS_KIND: &str = "modular_content";
/// Element kind string of rich text fields
pub const RICH_TEXT_KIND: &str = "rich_text";

/// How a reference-carrying field encodes its references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EncodingKind {
    /// Flat list of item codenames
    Link,
    /// Document with a nested list of embedded item codenames
    RichText,
}

impl EncodingKind {
    /// Classify a declared element kind; `None` for fields that cannot reference items
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            LINKED_ITEMS_KIND => Some(Self::Link),
            RICH_TEXT_KIND => Some(Self::RichText),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Link => "linked items",
            Self::RichText => "rich text",
        }
    }
}

/// A schema field able to hold item references
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceField {
    pub codename: String,
    pub name: String,
    pub type_codename: String,
    pub type_name: String,
    pub encoding: EncodingKind,
}

impl ReferenceField {
    /// Whether this field should be inspected on `item`
    pub fn applies_to(&self, item: &Item) -> bool {
        self.type_codename == item.type_codename || item.field_values.contains_key(&self.codename)
    }
}

/// Rich text value: markup plus the codenames of embedded items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichTextDocument {
    pub html: String,
    pub linked_items: Vec<String>,
}

/// Parsed value of one field on an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPayload {
    Links(Vec<String>),
    RichText(RichTextDocument),
    /// Field kind that cannot reference items
    Other,
}

impl FieldPayload {
    /// Codenames this value points at
    pub fn referenced_codenames(&self) -> &[String] {
        match self {
            Self::Links(codenames) => codenames,
            Self::RichText(document) => &document.linked_items,
            Self::Other => &[],
        }
    }
}

/// A content item with its reference-bearing field values
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub codename: String,
    pub name: String,
    pub type_codename: String,
    pub field_values: HashMap<String, FieldPayload>,
}

impl Item {
    pub fn to_ref(&self) -> ItemRef {
        ItemRef {
            codename: self.codename.clone(),
            name: self.name.clone(),
        }
    }
}

/// (codename, display name) pair reported to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRef {
    pub codename: String,
    pub name: String,
}

impl ItemRef {
    pub fn new(codename: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            codename: codename.into(),
            name: name.into(),
        }
    }
}

/// Referenced item codename -> display name. Sorted by codename.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageMap {
    entries: BTreeMap<String, String>,
}

impl UsageMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, codename: &str) -> bool {
        self.entries.contains_key(codename)
    }

    /// Insert unless already present; returns whether the entry was new
    pub fn insert(&mut self, codename: &str, name: &str) -> bool {
        if self.contains(codename) {
            return false;
        }
        self.entries.insert(codename.to_string(), name.to_string());
        true
    }

    #[cfg(test)]
    pub fn get(&self, codename: &str) -> Option<&str> {
        self.entries.get(codename).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn codenames(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn to_item_refs(&self) -> Vec<ItemRef> {
        self.entries
            .iter()
            .map(|(codename, name)| ItemRef::new(codename, name))
            .collect()
    }
}

/// Both halves of the partition from a single pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageReport {
    pub total_items: usize,
    pub reference_fields: Vec<ReferenceField>,
    pub used: Vec<ItemRef>,
    pub unused: Vec<ItemRef>,
}
