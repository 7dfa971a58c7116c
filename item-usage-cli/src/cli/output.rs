//! Rendering of query results for the terminal

use anyhow::{Context, Result};
use colored::*;

use super::OutputFormat;
use crate::report::csv::{write_fields, write_items};
use crate::services::usage::{ItemRef, ReferenceField, UsageReport};

pub fn render_items(items: &[ItemRef], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(items).context("Failed to format JSON output")
        }
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            write_items(&mut buf, items)?;
            String::from_utf8(buf).context("CSV output is not valid UTF-8")
        }
        OutputFormat::Table => {
            if items.is_empty() {
                return Ok("No items found".dimmed().to_string());
            }
            let mut out = String::new();
            for item in items {
                out.push_str(&format!(
                    "{}\n{}\n\n",
                    display_name(&item.name).bold(),
                    item.codename.dimmed()
                ));
            }
            out.push_str(&format!("{} items", items.len()));
            Ok(out)
        }
    }
}

pub fn render_fields(fields: &[ReferenceField], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(fields).context("Failed to format JSON output")
        }
        OutputFormat::Csv => {
            let mut buf = Vec::new();
            write_fields(&mut buf, fields)?;
            String::from_utf8(buf).context("CSV output is not valid UTF-8")
        }
        OutputFormat::Table => {
            if fields.is_empty() {
                return Ok("No linked items or rich text fields found".dimmed().to_string());
            }
            let mut out = String::new();
            for field in fields {
                out.push_str(&format!(
                    "{}\n{}\n{}\n{}\n{}\n\n",
                    field.name.bold(),
                    field.codename.dimmed(),
                    format!("(From content type, {})", field.encoding.label()).italic(),
                    field.type_name,
                    field.type_codename.dimmed()
                ));
            }
            out.push_str(&format!("{} fields", fields.len()));
            Ok(out)
        }
    }
}

pub fn render_summary(report: &UsageReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to format JSON output")
        }
        OutputFormat::Csv => Ok(format!(
            "ReferenceFields,TotalItems,Used,Unused\n{},{},{},{}\n",
            report.reference_fields.len(),
            report.total_items,
            report.used.len(),
            report.unused.len()
        )),
        OutputFormat::Table => Ok(format!(
            "{:<18} {}\n{:<18} {}\n{:<18} {}\n{:<18} {}",
            "Reference fields",
            report.reference_fields.len(),
            "Items",
            report.total_items,
            "Used",
            report.used.len().to_string().bright_green(),
            "Unused",
            report.unused.len().to_string().yellow()
        )),
    }
}

fn display_name(name: &str) -> &str {
    if name.trim().is_empty() { "(no name)" } else { name }
}
