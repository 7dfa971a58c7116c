//! CSV export of usage results

use anyhow::{Context, Result};
use csv::Writer;
use std::io::Write;
use std::path::Path;

use crate::services::usage::{ItemRef, ReferenceField};

const ITEM_HEADER: [&str; 2] = ["Codename", "Name"];
const FIELD_HEADER: [&str; 5] = [
    "Codename",
    "Name",
    "ContentTypeCodename",
    "ContentTypeName",
    "Kind",
];

/// Write (codename, name) rows with a header to any writer
pub fn write_items<W: Write>(writer: W, items: &[ItemRef]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);

    wtr.write_record(ITEM_HEADER)
        .context("Failed to write CSV header")?;
    for item in items {
        wtr.write_record([&item.codename, &item.name])
            .with_context(|| format!("Failed to write item: {}", item.codename))?;
    }

    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// Write reference field rows with a header to any writer
pub fn write_fields<W: Write>(writer: W, fields: &[ReferenceField]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);

    wtr.write_record(FIELD_HEADER)
        .context("Failed to write CSV header")?;
    for field in fields {
        wtr.write_record([
            field.codename.as_str(),
            field.name.as_str(),
            field.type_codename.as_str(),
            field.type_name.as_str(),
            field.encoding.label(),
        ])
        .with_context(|| format!("Failed to write field: {}", field.codename))?;
    }

    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

/// Export items to a CSV file at `path`
pub fn write_items_csv(path: &Path, items: &[ItemRef]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    write_items(file, items)?;

    log::info!("CSV file exported to: {}", path.display());
    Ok(())
}

/// Export reference fields to a CSV file at `path`
pub fn write_fields_csv(path: &Path, fields: &[ReferenceField]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    write_fields(file, fields)?;

    log::info!("CSV file exported to: {}", path.display());
    Ok(())
}
