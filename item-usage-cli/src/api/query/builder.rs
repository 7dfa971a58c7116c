//! Fluent builder for `/items` query strings

/// Largest page the delivery API accepts for item listings
pub const MAX_PAGE_SIZE: u32 = 2000;

/// Reusable description of an item listing request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemsQuery {
    /// Element projection; empty means every element is returned
    pub elements: Vec<String>,
    /// Depth of linked items to include in `modular_content`
    pub depth: Option<u32>,
    pub limit: Option<u32>,
}

impl ItemsQuery {
    /// Render as a query string without the leading `?`
    pub fn to_query_string(&self) -> String {
        let mut params: Vec<String> = Vec::new();

        if !self.elements.is_empty() {
            let projection = self
                .elements
                .iter()
                .map(|e| urlencoding::encode(e).into_owned())
                .collect::<Vec<_>>()
                .join(",");
            params.push(format!("elements={}", projection));
        }
        if let Some(depth) = self.depth {
            params.push(format!("depth={}", depth));
        }
        if let Some(limit) = self.limit {
            params.push(format!("limit={}", limit));
        }

        params.join("&")
    }
}

/// Fluent builder for `ItemsQuery`
#[derive(Debug, Default)]
pub struct QueryBuilder {
    query: ItemsQuery,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the response to the given element codenames
    pub fn elements<S: AsRef<str>>(mut self, elements: &[S]) -> Self {
        self.query.elements = elements.iter().map(|e| e.as_ref().to_string()).collect();
        self
    }

    pub fn depth(mut self, depth: u32) -> Self {
        self.query.depth = Some(depth);
        self
    }

    /// Page size, clamped to what the API accepts
    pub fn limit(mut self, limit: u32) -> Self {
        self.query.limit = Some(limit.clamp(1, MAX_PAGE_SIZE));
        self
    }

    pub fn build(self) -> ItemsQuery {
        self.query
    }
}
