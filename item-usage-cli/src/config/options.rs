//! Resolved delivery connection options

use std::time::Duration;

use super::{DEFAULT_DELIVERY_URL, DEFAULT_PAGE_SIZE, DEFAULT_PREVIEW_URL, DEFAULT_TIMEOUT_SECS};
use crate::api::DeliveryMode;
use crate::error::{Result, UsageError};

/// Everything needed to talk to one delivery project
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryOptions {
    pub project_id: String,
    pub mode: DeliveryMode,
    pub delivery_url: String,
    pub preview_url: String,
    pub page_size: u32,
    pub timeout: Duration,
}

impl Default for DeliveryOptions {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            mode: DeliveryMode::Published,
            delivery_url: DEFAULT_DELIVERY_URL.to_string(),
            preview_url: DEFAULT_PREVIEW_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl DeliveryOptions {
    /// Check the options before any request goes out
    pub fn validate(&self) -> Result<()> {
        if super::is_unset(&self.project_id) {
            return Err(UsageError::configuration(
                "Project ID is not set. Use --project-id, ITEM_USAGE_PROJECT_ID or 'item-usage config set project_id <id>'",
            ));
        }
        for url in [&self.delivery_url, &self.preview_url] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(UsageError::configuration(format!(
                    "Endpoint must be an http(s) URL: {}",
                    url
                )));
            }
        }
        Ok(())
    }
}
