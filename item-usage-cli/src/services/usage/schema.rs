//! Schema scanner: finds the fields that can reference other items

use log::debug;

use super::models::{EncodingKind, ReferenceField};
use crate::api::{ContentSource, ContentType};
use crate::error::Result;

/// Fetch the type schema and return its reference-carrying fields
pub async fn scan<S: ContentSource + ?Sized>(source: &S) -> Result<Vec<ReferenceField>> {
    let types = source.get_schema().await?;
    let fields = reference_fields(&types);

    debug!(
        "Schema scan: {} content types, {} reference fields",
        types.len(),
        fields.len()
    );
    Ok(fields)
}

/// Linked-items and rich text fields of `types`, in type then declaration order
pub fn reference_fields(types: &[ContentType]) -> Vec<ReferenceField> {
    types
        .iter()
        .flat_map(|content_type| {
            content_type.elements.iter().filter_map(move |element| {
                EncodingKind::from_kind(&element.kind).map(|encoding| ReferenceField {
                    codename: element.codename.clone(),
                    name: element.name.clone(),
                    type_codename: content_type.codename.clone(),
                    type_name: content_type.name.clone(),
                    encoding,
                })
            })
        })
        .collect()
}

/// Distinct field codenames of `fields`, first occurrence order
pub fn projection(fields: &[ReferenceField]) -> Vec<String> {
    let mut codenames: Vec<String> = Vec::new();
    for field in fields {
        if !codenames.contains(&field.codename) {
            codenames.push(field.codename.clone());
        }
    }
    codenames
}
