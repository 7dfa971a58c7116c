//! Command-line interface

pub mod commands;
pub mod output;
pub mod shell;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::Settings;
use commands::config::ConfigCommands;
use commands::usage::UsageArgs;

#[derive(Parser, Debug)]
#[command(
    name = "item-usage",
    version,
    about = "Find which content items are referenced by other items, and which are orphaned"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection and display flags shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Delivery project ID
    #[arg(long, global = true, env = "ITEM_USAGE_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Preview API key; when set, unpublished content is included
    #[arg(long, global = true, env = "ITEM_USAGE_PREVIEW_KEY", hide_env_values = true)]
    pub preview_key: Option<String>,

    /// Delivery API base URL
    #[arg(long, global = true, env = "ITEM_USAGE_DELIVERY_URL")]
    pub delivery_url: Option<String>,

    /// Preview delivery API base URL
    #[arg(long, global = true, env = "ITEM_USAGE_PREVIEW_URL")]
    pub preview_url: Option<String>,

    /// Items requested per page
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Flags as a settings layer to merge over the settings file
    pub fn to_settings(&self) -> Settings {
        Settings {
            project_id: self.project_id.clone(),
            preview_key: self.preview_key.clone(),
            delivery_url: self.delivery_url.clone(),
            preview_url: self.preview_url.clone(),
            page_size: self.page_size,
            timeout_secs: None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List items no other item references
    Unused(UsageArgs),
    /// List items referenced by at least one item
    Used(UsageArgs),
    /// List linked-items and rich text fields that can reference items
    Elements(UsageArgs),
    /// Counts of reference fields, used and unused items
    Summary,
    /// Interactive session (setID, setKey, unused, used, elements)
    Shell,
    /// Manage the settings file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable listing
    #[default]
    Table,
    /// Comma separated values with a header row
    Csv,
    /// Pretty printed JSON
    Json,
}

pub async fn run(cli: Cli) -> Result<()> {
    let global = cli.global;
    match cli.command {
        Commands::Unused(args) => commands::usage::handler::handle_unused(&global, args).await,
        Commands::Used(args) => commands::usage::handler::handle_used(&global, args).await,
        Commands::Elements(args) => commands::usage::handler::handle_elements(&global, args).await,
        Commands::Summary => commands::usage::handler::handle_summary(&global).await,
        Commands::Shell => shell::run(&global).await,
        Commands::Config { command } => commands::config::handler::handle_config_command(command),
    }
}
