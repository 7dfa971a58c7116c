//! Delivery API client
//!
//! `ContentSource` is the read-only surface the usage services need: the type
//! schema and one page of items at a time. `DeliveryClient` implements it over
//! HTTP with reqwest.

use async_trait::async_trait;
use log::debug;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::collections::HashSet;

use super::auth::DeliveryMode;
use super::models::{ContentType, ItemsPage, ItemsResponse, TypesResponse};
use super::query::{ItemsQuery, PageCursor, QueryBuilder};
use crate::config::DeliveryOptions;
use crate::error::{Result, UsageError};

const USER_AGENT: &str = concat!("item-usage/", env!("CARGO_PKG_VERSION"));

/// Source of content types and items
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Every content type with its element declarations, in API order
    async fn get_schema(&self) -> Result<Vec<ContentType>>;

    /// One page of items projected to `projected_fields`. `cursor` is `None`
    /// for the first page and the previous page's `next` afterwards.
    async fn get_items_page(
        &self,
        projected_fields: &[String],
        cursor: Option<&PageCursor>,
    ) -> Result<ItemsPage>;
}

/// HTTP client for one delivery project
#[derive(Debug, Clone)]
pub struct DeliveryClient {
    http: reqwest::Client,
    project_url: String,
    mode: DeliveryMode,
    page_size: u32,
}

impl DeliveryClient {
    /// Create a client for the project in `options`. Fails with a
    /// configuration error when the project ID is missing.
    pub fn new(options: &DeliveryOptions) -> Result<Self> {
        options.validate()?;

        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let root = match options.mode {
            DeliveryMode::Published => &options.delivery_url,
            DeliveryMode::Preview { .. } => &options.preview_url,
        };
        let project_url = format!(
            "{}/{}",
            root.trim_end_matches('/'),
            urlencoding::encode(options.project_id.trim())
        );

        debug!("Delivery client for {} ({})", project_url, options.mode.label());

        Ok(Self {
            http,
            project_url,
            mode: options.mode.clone(),
            page_size: options.page_size,
        })
    }

    #[cfg(test)]
    pub fn project_url(&self) -> &str {
        &self.project_url
    }

    #[cfg(test)]
    pub fn mode(&self) -> &DeliveryMode {
        &self.mode
    }

    pub fn types_url(&self) -> String {
        format!("{}/types", self.project_url)
    }

    pub fn items_url(&self, query: &ItemsQuery) -> String {
        let query_string = query.to_query_string();
        if query_string.is_empty() {
            format!("{}/items", self.project_url)
        } else {
            format!("{}/items?{}", self.project_url, query_string)
        }
    }

    /// First-page query for an item listing projected to `projected_fields`
    pub fn items_query(&self, projected_fields: &[String]) -> ItemsQuery {
        QueryBuilder::new()
            .elements(projected_fields)
            .depth(0)
            .limit(self.page_size)
            .build()
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        reqwest::Url::parse(url).map_err(|e| UsageError::InvalidUrl(format!("{}: {}", url, e)))?;

        let mut request = self.http.get(url).header(ACCEPT, "application/json");
        if let Some(token) = self.mode.bearer_token() {
            request = request.bearer_auth(token);
        }

        debug!("GET {}", url);
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(UsageError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ContentSource for DeliveryClient {
    async fn get_schema(&self) -> Result<Vec<ContentType>> {
        let mut types = Vec::new();
        let mut url = self.types_url();
        let mut requested = HashSet::new();

        loop {
            requested.insert(url.clone());
            let response: TypesResponse = self.get_json(&url).await?;
            for content_type in response.types {
                types.push(content_type.into_content_type()?);
            }

            match response.pagination.next_cursor() {
                Some(next) if requested.contains(next.as_str()) => {
                    return Err(UsageError::StalledPagination(next.to_string()));
                }
                Some(next) => url = next.to_string(),
                None => break,
            }
        }

        debug!("Fetched {} content types", types.len());
        Ok(types)
    }

    async fn get_items_page(
        &self,
        projected_fields: &[String],
        cursor: Option<&PageCursor>,
    ) -> Result<ItemsPage> {
        let url = match cursor {
            Some(cursor) => cursor.to_string(),
            None => self.items_url(&self.items_query(projected_fields)),
        };

        let response: ItemsResponse = self.get_json(&url).await?;
        let pagination = &response.pagination;
        debug!(
            "Items page skip={} limit={} count={}",
            pagination.skip, pagination.limit, pagination.count
        );
        Ok(ItemsPage::from(response))
    }
}
