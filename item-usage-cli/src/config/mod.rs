//! Configuration for the delivery connection
//!
//! Settings come from command-line flags, environment variables (optionally
//! loaded from a `.env` file) and a TOML file in the user's config directory,
//! in that order of precedence.

pub mod options;
pub mod settings;

pub use options::DeliveryOptions;
pub use settings::Settings;

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DEFAULT_DELIVERY_URL: &str = "https://deliver.kontent.ai";
pub const DEFAULT_PREVIEW_URL: &str = "https://preview-deliver.kontent.ai";
pub const DEFAULT_PAGE_SIZE: u32 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const APP_DIR: &str = "item-usage";
const CONFIG_FILE: &str = "config.toml";

/// Blank values and the literal `null` (any casing) count as not set
pub fn is_unset(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null")
}

/// Location of the settings file
pub fn config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().context("Could not determine the user config directory")?;
    Ok(dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load the settings file from its default location
pub fn load() -> Result<Settings> {
    let path = config_path()?;
    Settings::load_from(&path)
}
