//! Opaque pagination cursor

use std::fmt;

/// Continuation for the next page of a listing, as handed out by the API.
///
/// The delivery API returns the absolute URL of the next page; the cursor
/// keeps it verbatim and callers never look inside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor(String);

impl PageCursor {
    pub fn new(next_page: impl Into<String>) -> Self {
        Self(next_page.into())
    }

    /// `None` when the API reports no further page (empty `next_page`)
    pub fn from_next_page(next_page: &str) -> Option<Self> {
        let trimmed = next_page.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self::new(trimmed))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
