//! Item usage service
//!
//! Works out which content items are referenced by other items and which are
//! orphaned. Every query is a fresh pipeline run against the source:
//!
//! 1. `schema::scan` - find linked-items and rich text fields
//! 2. `paginator::fetch_all` - load every item, projected to those fields
//! 3. `extract::extract` - collect referenced codenames into a `UsageMap`
//! 4. `resolve::unused` - everything not in the map
//!
//! Nothing is cached between queries.

pub mod extract;
pub mod models;
pub mod paginator;
pub mod resolve;
pub mod schema;

#[cfg(test)]
pub mod testing;

pub use models::{ItemRef, ReferenceField, UsageReport};

use log::info;

use crate::api::ContentSource;
use crate::error::Result;

/// On-demand usage queries over one content source
pub struct ItemUsage<S> {
    source: S,
}

impl<S: ContentSource> ItemUsage<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fields that can reference other items
    pub async fn reference_fields(&self) -> Result<Vec<ReferenceField>> {
        schema::scan(&self.source).await
    }

    /// Items referenced by at least one item, sorted by codename
    pub async fn used_items(&self) -> Result<Vec<ItemRef>> {
        let fields = schema::scan(&self.source).await?;
        let items = paginator::fetch_all(&self.source, &fields).await?;
        let usage = extract::extract(&fields, &items);

        if usage.is_empty() {
            info!("None of {} items is referenced", items.len());
        } else {
            info!("{} of {} items are referenced", usage.len(), items.len());
        }
        Ok(usage.to_item_refs())
    }

    /// Items no item references, in delivery order
    pub async fn unused_items(&self) -> Result<Vec<ItemRef>> {
        let fields = schema::scan(&self.source).await?;
        let items = paginator::fetch_all(&self.source, &fields).await?;
        let usage = extract::extract(&fields, &items);
        let unused = resolve::unused(&items, &usage);

        info!("{} of {} items are not referenced", unused.len(), items.len());
        Ok(unused)
    }

    /// Catalog plus both halves of the partition from one pipeline run
    pub async fn report(&self) -> Result<UsageReport> {
        let fields = schema::scan(&self.source).await?;
        let items = paginator::fetch_all(&self.source, &fields).await?;
        let usage = extract::extract(&fields, &items);
        let unused = resolve::unused(&items, &usage);

        Ok(UsageReport {
            total_items: items.len(),
            reference_fields: fields,
            used: usage.to_item_refs(),
            unused,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::models::EncodingKind;
    use super::testing::{FakeSource, content_type, link_element, raw_item, rich_text_element};
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn codenames(refs: &[ItemRef]) -> Vec<&str> {
        refs.iter().map(|r| r.codename.as_str()).collect()
    }

    /// A links to B through a LINK field; C embeds B in a RICHTEXT field
    fn link_and_rich_text_source() -> FakeSource {
        FakeSource::new(vec![
            content_type("article", &[("title", "text"), ("related", "modular_content")]),
            content_type("page", &[("body", "rich_text")]),
        ])
        .with_items(vec![
            raw_item("a", "article", vec![("related", link_element(&["b"]))]),
            raw_item("b", "article", vec![("related", link_element(&[]))]),
            raw_item("c", "page", vec![("body", rich_text_element("<p>B</p>", &["b"]))]),
        ])
    }

    #[tokio::test]
    async fn test_used_and_unused_partition() {
        let usage = ItemUsage::new(link_and_rich_text_source());

        let used = usage.used_items().await.unwrap();
        let unused = usage.unused_items().await.unwrap();

        assert_eq!(used, vec![ItemRef::new("b", "B")]);
        assert_eq!(codenames(&unused), vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_every_query_rescans() {
        let usage = ItemUsage::new(link_and_rich_text_source());

        usage.used_items().await.unwrap();
        usage.unused_items().await.unwrap();
        usage.reference_fields().await.unwrap();

        assert_eq!(usage.source().schema_requests(), 3);
        assert_eq!(usage.source().page_requests(), 2);
    }

    #[tokio::test]
    async fn test_no_reference_fields() {
        let source = FakeSource::new(vec![content_type("article", &[("title", "text")])])
            .with_items(vec![
                raw_item("a", "article", vec![]),
                raw_item("b", "article", vec![]),
            ]);
        let usage = ItemUsage::new(source);

        assert!(usage.used_items().await.unwrap().is_empty());
        assert_eq!(codenames(&usage.unused_items().await.unwrap()), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_self_reference_is_used() {
        let types = vec![content_type("article", &[("related", "modular_content")])];
        let source = FakeSource::new(types).with_items(vec![
            raw_item("a", "article", vec![("related", link_element(&["a"]))]),
            raw_item("b", "article", vec![]),
        ]);
        let usage = ItemUsage::new(source);

        assert_eq!(codenames(&usage.used_items().await.unwrap()), vec!["a"]);
        assert_eq!(codenames(&usage.unused_items().await.unwrap()), vec!["b"]);
    }

    #[tokio::test]
    async fn test_report_partitions_items_across_pages() {
        let types = vec![content_type("article", &[("related", "modular_content")])];
        let source = FakeSource::new(types).with_pages(vec![
            vec![
                raw_item("a", "article", vec![("related", link_element(&["e", "ghost"]))]),
                raw_item("b", "article", vec![]),
            ],
            vec![raw_item("c", "article", vec![("related", link_element(&["b"]))])],
            vec![raw_item("d", "article", vec![]), raw_item("e", "article", vec![])],
        ]);
        let report = ItemUsage::new(source).report().await.unwrap();

        assert_eq!(report.total_items, 5);
        assert_eq!(codenames(&report.used), vec!["b", "e"]);
        assert_eq!(codenames(&report.unused), vec!["a", "c", "d"]);

        let used: HashSet<&str> = codenames(&report.used).into_iter().collect();
        let unused: HashSet<&str> = codenames(&report.unused).into_iter().collect();
        assert!(used.is_disjoint(&unused));
        assert_eq!(used.len() + unused.len(), report.total_items);
    }

    #[tokio::test]
    async fn test_reference_fields_catalog() {
        let usage = ItemUsage::new(link_and_rich_text_source());
        let fields = usage.reference_fields().await.unwrap();

        let summary: Vec<(&str, &str, EncodingKind)> = fields
            .iter()
            .map(|f| (f.type_codename.as_str(), f.codename.as_str(), f.encoding))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("article", "related", EncodingKind::Link),
                ("page", "body", EncodingKind::RichText),
            ]
        );
        assert_eq!(usage.source().page_requests(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_fails_whole_query() {
        let source = link_and_rich_text_source()
            .with_pages(vec![vec![raw_item("a", "article", vec![])], vec![]])
            .failing_at_page(1);
        let usage = ItemUsage::new(source);

        assert!(usage.unused_items().await.is_err());
        assert!(usage.used_items().await.is_err());
    }
}
