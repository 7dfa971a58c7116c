//! Settings file commands

pub mod handler;

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Show the stored settings
    Show,
    /// Store a setting
    Set {
        /// One of: project_id, preview_key, delivery_url, preview_url, page_size, timeout_secs
        key: String,
        value: String,
    },
    /// Remove a stored setting
    Unset { key: String },
    /// Print the settings file location
    Path,
}
