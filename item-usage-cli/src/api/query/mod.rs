//! Item listing query builder
//!
//! `ItemsQuery` is the reusable query, `QueryBuilder` the fluent way to make one.
//! `PageCursor` carries the continuation returned by the API between pages.

pub mod builder;
pub mod cursor;

pub use builder::{ItemsQuery, QueryBuilder};
pub use cursor::PageCursor;
