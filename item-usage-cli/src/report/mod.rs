//! Report export

pub mod csv;

pub use self::csv::{write_fields_csv, write_items_csv};
