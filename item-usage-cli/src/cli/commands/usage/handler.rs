//! Usage command handlers

use anyhow::{Context, Result};
use colored::*;
use std::time::Instant;

use super::UsageArgs;
use crate::api::DeliveryClient;
use crate::cli::{GlobalArgs, output};
use crate::config::DeliveryOptions;
use crate::report;
use crate::services::usage::{ItemRef, ItemUsage};

/// Resolve settings (flags over settings file) into delivery options
pub fn resolve_options(global: &GlobalArgs) -> Result<DeliveryOptions> {
    let file = crate::config::load()?;
    Ok(file.merge(global.to_settings()).to_delivery_options())
}

/// Build the usage service, announcing the delivery mode
pub fn connect(options: &DeliveryOptions) -> Result<ItemUsage<DeliveryClient>> {
    let client = DeliveryClient::new(options)?;

    if !options.mode.is_preview() {
        eprintln!("{}", "(No preview key; published content only)".dimmed());
    }
    log::info!("Using project {} ({})", options.project_id, options.mode.label());

    Ok(ItemUsage::new(client))
}

fn connect_global(global: &GlobalArgs) -> Result<ItemUsage<DeliveryClient>> {
    let options = resolve_options(global)?;
    connect(&options)
}

pub async fn handle_unused(global: &GlobalArgs, args: UsageArgs) -> Result<()> {
    let usage = connect_global(global)?;
    let start = Instant::now();

    let items = usage
        .unused_items()
        .await
        .context("Failed to find unused items")?;
    log::debug!("Unused query took {:.2}s", start.elapsed().as_secs_f64());

    show_items(global, &args, &items)
}

pub async fn handle_used(global: &GlobalArgs, args: UsageArgs) -> Result<()> {
    let usage = connect_global(global)?;
    let start = Instant::now();

    let items = usage
        .used_items()
        .await
        .context("Failed to find used items")?;
    log::debug!("Used query took {:.2}s", start.elapsed().as_secs_f64());

    show_items(global, &args, &items)
}

/// Save to `--output` when given, then print in the chosen format
fn show_items(global: &GlobalArgs, args: &UsageArgs, items: &[ItemRef]) -> Result<()> {
    if let Some(path) = args.output.as_deref() {
        report::write_items_csv(path, items)?;
        eprintln!("Results saved to: {}", path.display().to_string().bright_green());
    }
    println!("{}", output::render_items(items, global.format)?);
    Ok(())
}

pub async fn handle_elements(global: &GlobalArgs, args: UsageArgs) -> Result<()> {
    let usage = connect_global(global)?;

    let fields = usage
        .reference_fields()
        .await
        .context("Failed to scan content types")?;

    if let Some(path) = args.output.as_deref() {
        report::write_fields_csv(path, &fields)?;
        eprintln!("Results saved to: {}", path.display().to_string().bright_green());
    }
    println!("{}", output::render_fields(&fields, global.format)?);
    Ok(())
}

pub async fn handle_summary(global: &GlobalArgs) -> Result<()> {
    let usage = connect_global(global)?;

    let report = usage.report().await.context("Failed to build usage report")?;
    println!("{}", output::render_summary(&report, global.format)?);
    Ok(())
}
