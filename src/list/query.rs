/// Filter a list view can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Free text, committed explicitly
    Search,
    /// Record status, applied on change
    Status,
    /// Service category, applied on change
    Category,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Search => "search",
            FilterKind::Status => "status",
            FilterKind::Category => "category",
        }
    }
}

/// Page and filter state sent with every list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
}

impl ListQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            search: None,
            status: None,
            category: None,
        }
    }

    pub fn filter(&self, kind: FilterKind) -> Option<&str> {
        match kind {
            FilterKind::Search => self.search.as_deref(),
            FilterKind::Status => self.status.as_deref(),
            FilterKind::Category => self.category.as_deref(),
        }
    }

    pub(crate) fn filter_mut(&mut self, kind: FilterKind) -> &mut Option<String> {
        match kind {
            FilterKind::Search => &mut self.search,
            FilterKind::Status => &mut self.status,
            FilterKind::Category => &mut self.category,
        }
    }
}

/// Trims a filter value; blank means "no filter".
pub fn normalize_filter(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
