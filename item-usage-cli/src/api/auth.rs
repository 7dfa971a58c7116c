//! Delivery authentication modes

use serde::{Deserialize, Serialize};

/// How requests against the delivery API are authenticated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryMode {
    /// No credential; only published content is visible
    Published,
    /// Preview API key; unpublished content is visible too
    Preview { key: String },
}

impl DeliveryMode {
    /// Pick the mode from an optional preview key. Blank keys and the literal
    /// `null` mean no key was given.
    pub fn from_preview_key(key: Option<&str>) -> Self {
        match key.map(str::trim) {
            Some(key) if !crate::config::is_unset(key) => Self::Preview {
                key: key.to_string(),
            },
            _ => Self::Published,
        }
    }

    pub fn is_preview(&self) -> bool {
        matches!(self, Self::Preview { .. })
    }

    /// Bearer token to attach to requests, if any
    pub fn bearer_token(&self) -> Option<&str> {
        match self {
            Self::Published => None,
            Self::Preview { key } => Some(key),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Published => "published content only",
            Self::Preview { .. } => "preview (includes unpublished content)",
        }
    }
}
