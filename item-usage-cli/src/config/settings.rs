//! Settings file and layered overrides

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use super::{
    DEFAULT_DELIVERY_URL, DEFAULT_PAGE_SIZE, DEFAULT_PREVIEW_URL, DEFAULT_TIMEOUT_SECS, is_unset,
};
use super::options::DeliveryOptions;
use crate::api::DeliveryMode;
use crate::api::query::builder::MAX_PAGE_SIZE;

/// Keys accepted by `config set` / `config unset`
pub const KEYS: &[&str] = &[
    "project_id",
    "preview_key",
    "delivery_url",
    "preview_url",
    "page_size",
    "timeout_secs",
];

/// One layer of settings. Every field is optional so layers can be merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Settings {
    /// Read settings from `path`; a missing file yields empty settings
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;

        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "project_id" => self.project_id = Some(value.to_string()),
            "preview_key" => self.preview_key = Some(value.to_string()),
            "delivery_url" => self.delivery_url = Some(value.to_string()),
            "preview_url" => self.preview_url = Some(value.to_string()),
            "page_size" => {
                self.page_size = Some(
                    value
                        .parse()
                        .with_context(|| format!("page_size must be a number, got '{}'", value))?,
                )
            }
            "timeout_secs" => {
                self.timeout_secs = Some(value.parse().with_context(|| {
                    format!("timeout_secs must be a number, got '{}'", value)
                })?)
            }
            _ => bail!("Unknown setting '{}'. Valid keys: {}", key, KEYS.join(", ")),
        }
        Ok(())
    }

    pub fn unset(&mut self, key: &str) -> Result<()> {
        match key {
            "project_id" => self.project_id = None,
            "preview_key" => self.preview_key = None,
            "delivery_url" => self.delivery_url = None,
            "preview_url" => self.preview_url = None,
            "page_size" => self.page_size = None,
            "timeout_secs" => self.timeout_secs = None,
            _ => bail!("Unknown setting '{}'. Valid keys: {}", key, KEYS.join(", ")),
        }
        Ok(())
    }

    /// Values for display; the preview key is masked
    pub fn entries(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("project_id", self.project_id.clone()),
            ("preview_key", self.preview_key.as_deref().map(mask_secret)),
            ("delivery_url", self.delivery_url.clone()),
            ("preview_url", self.preview_url.clone()),
            ("page_size", self.page_size.map(|v| v.to_string())),
            ("timeout_secs", self.timeout_secs.map(|v| v.to_string())),
        ]
    }

    /// Layer `overrides` on top of `self`. Set, non-blank override values win.
    /// A preview key override of `null` switches to published content even
    /// when the lower layer has a key.
    pub fn merge(self, overrides: Settings) -> Settings {
        fn pick(over: Option<String>, base: Option<String>) -> Option<String> {
            match over {
                Some(value) if !is_unset(&value) => Some(value),
                _ => base,
            }
        }

        let preview_key = match overrides.preview_key {
            Some(key) if key.trim().eq_ignore_ascii_case("null") => Some(key),
            other => pick(other, self.preview_key),
        };

        Settings {
            project_id: pick(overrides.project_id, self.project_id),
            preview_key,
            delivery_url: pick(overrides.delivery_url, self.delivery_url),
            preview_url: pick(overrides.preview_url, self.preview_url),
            page_size: overrides.page_size.or(self.page_size),
            timeout_secs: overrides.timeout_secs.or(self.timeout_secs),
        }
    }

    /// Fill in defaults and pick the authentication mode. The page size is
    /// clamped to what the API accepts.
    pub fn to_delivery_options(&self) -> DeliveryOptions {
        let url_or = |value: &Option<String>, default: &str| match value {
            Some(url) if !is_unset(url) => url.trim().to_string(),
            _ => default.to_string(),
        };

        DeliveryOptions {
            project_id: self
                .project_id
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            mode: DeliveryMode::from_preview_key(self.preview_key.as_deref()),
            delivery_url: url_or(&self.delivery_url, DEFAULT_DELIVERY_URL),
            preview_url: url_or(&self.preview_url, DEFAULT_PREVIEW_URL),
            page_size: self
                .page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
