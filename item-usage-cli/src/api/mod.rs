//! Delivery API module
//!
//! Read-only client for a headless CMS delivery endpoint. Exposes the
//! `ContentSource` seam the usage services are written against, the wire
//! models returned by the endpoint, and the query builder used for item
//! listing requests.

pub mod auth;
pub mod client;
pub mod models;
pub mod query;

pub use auth::DeliveryMode;
pub use client::{ContentSource, DeliveryClient};
pub use models::{ContentType, RawElement, RawItem};
pub use query::PageCursor;
