//! In-memory `ContentSource` for pipeline tests

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::api::models::{ItemsPage, TypeElement};
use crate::api::{ContentSource, ContentType, PageCursor, RawElement, RawItem};
use crate::error::{Result, UsageError};

const CURSOR_PREFIX: &str = "fake://items?page=";

/// Serves a fixed schema and a fixed list of pages
#[derive(Debug, Default)]
pub struct FakeSource {
    types: Vec<ContentType>,
    pages: Vec<Vec<RawItem>>,
    fail_at_page: Option<usize>,
    link_back: Option<(usize, usize)>,
    schema_requests: AtomicUsize,
    page_requests: AtomicUsize,
    projections: Mutex<Vec<Vec<String>>>,
}

impl FakeSource {
    pub fn new(types: Vec<ContentType>) -> Self {
        Self {
            types,
            ..Self::default()
        }
    }

    pub fn with_pages(mut self, pages: Vec<Vec<RawItem>>) -> Self {
        self.pages = pages;
        self
    }

    /// Serve every item on a single page
    pub fn with_items(self, items: Vec<RawItem>) -> Self {
        self.with_pages(vec![items])
    }

    /// Respond with a 503 when page `index` (zero based) is requested
    pub fn failing_at_page(mut self, index: usize) -> Self {
        self.fail_at_page = Some(index);
        self
    }

    /// Make page `from` point back at page `to` instead of its successor
    pub fn linking_back(mut self, from: usize, to: usize) -> Self {
        self.link_back = Some((from, to));
        self
    }

    pub fn schema_requests(&self) -> usize {
        self.schema_requests.load(Ordering::SeqCst)
    }

    pub fn page_requests(&self) -> usize {
        self.page_requests.load(Ordering::SeqCst)
    }

    pub fn projections(&self) -> Vec<Vec<String>> {
        self.projections.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentSource for FakeSource {
    async fn get_schema(&self) -> Result<Vec<ContentType>> {
        self.schema_requests.fetch_add(1, Ordering::SeqCst);
        Ok(self.types.clone())
    }

    async fn get_items_page(
        &self,
        projected_fields: &[String],
        cursor: Option<&PageCursor>,
    ) -> Result<ItemsPage> {
        self.page_requests.fetch_add(1, Ordering::SeqCst);
        self.projections
            .lock()
            .unwrap()
            .push(projected_fields.to_vec());

        let index = match cursor {
            None => 0,
            Some(cursor) => cursor
                .as_str()
                .strip_prefix(CURSOR_PREFIX)
                .and_then(|n| n.parse().ok())
                .expect("cursor handed out by FakeSource"),
        };

        if self.fail_at_page == Some(index) {
            return Err(UsageError::Status {
                url: format!("{}{}", CURSOR_PREFIX, index),
                status: 503,
                body: "Service Unavailable".to_string(),
            });
        }

        let items = self.pages.get(index).cloned().unwrap_or_default();
        let next_index = match self.link_back {
            Some((from, to)) if from == index => Some(to),
            _ => (index + 1 < self.pages.len()).then_some(index + 1),
        };
        let next = next_index.map(|n| PageCursor::new(format!("{}{}", CURSOR_PREFIX, n)));

        Ok(ItemsPage { items, next })
    }
}

pub fn content_type(codename: &str, elements: &[(&str, &str)]) -> ContentType {
    ContentType {
        codename: codename.to_string(),
        name: codename.to_uppercase(),
        elements: elements
            .iter()
            .map(|(element, kind)| TypeElement {
                codename: element.to_string(),
                name: element.to_uppercase(),
                kind: kind.to_string(),
            })
            .collect(),
    }
}

/// Item whose display name is its codename upper-cased
pub fn raw_item(codename: &str, type_codename: &str, elements: Vec<(&str, RawElement)>) -> RawItem {
    RawItem {
        codename: codename.to_string(),
        name: codename.to_uppercase(),
        type_codename: type_codename.to_string(),
        elements: elements
            .into_iter()
            .map(|(codename, element)| (codename.to_string(), element))
            .collect::<HashMap<_, _>>(),
    }
}

pub fn link_element(codenames: &[&str]) -> RawElement {
    RawElement {
        kind: "modular_content".to_string(),
        name: "Linked items".to_string(),
        value: json!(codenames),
        modular_content: Vec::new(),
    }
}

pub fn rich_text_element(html: &str, linked_items: &[&str]) -> RawElement {
    RawElement {
        kind: "rich_text".to_string(),
        name: "Body".to_string(),
        value: json!(html),
        modular_content: linked_items.iter().map(|c| c.to_string()).collect(),
    }
}
