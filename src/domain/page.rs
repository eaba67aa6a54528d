//! Pagination, filter and sort models.
//!
//! These mirror the server's limit/offset paginator: requests carry
//! `page`, `page_size` and JSON-encoded `filter`/`sort` strings, and responses
//! come back as `{current_page, page_size, total_count, items}`.

use crate::domain::error::{ConsoleError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Page sizes offered by the grid's size selector.
pub const ALLOWED_PAGE_SIZES: [u32; 4] = [15, 30, 50, 100];

/// Page size used when a grid is created without one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Filter field name to filter value.
pub type FilterState = Map<String, Value>;

/// Snaps a requested page size onto [`ALLOWED_PAGE_SIZES`].
///
/// Picks the smallest allowed size that is at least `requested`, or the largest
/// allowed size when `requested` exceeds them all.
#[must_use]
pub fn clamp_page_size(requested: u32) -> u32 {
    ALLOWED_PAGE_SIZES
        .iter()
        .copied()
        .find(|&size| size >= requested)
        .unwrap_or(ALLOWED_PAGE_SIZES[ALLOWED_PAGE_SIZES.len() - 1])
}

/// Current position within a paginated result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// One-based page index.
    pub current_page: u32,
    /// Rows per page, always non-zero.
    pub page_size: u32,
    /// Rows across all pages as last reported by the server.
    pub total_count: u64,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_count: 0,
        }
    }
}

impl PaginationState {
    /// Builds a state from optional externally supplied values.
    ///
    /// Missing or zero values fall back to the defaults.
    #[must_use]
    pub fn from_parts(current_page: Option<u32>, page_size: Option<u32>, total_count: Option<u64>) -> Self {
        let defaults = Self::default();
        Self {
            current_page: current_page.filter(|&p| p >= 1).unwrap_or(defaults.current_page),
            page_size: page_size.filter(|&s| s > 0).unwrap_or(defaults.page_size),
            total_count: total_count.unwrap_or(defaults.total_count),
        }
    }

    /// Number of pages, never less than one.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        let size = u64::from(self.page_size.max(1));
        let pages = self.total_count.div_ceil(size).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Zero-based offset of the first row on the current page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.current_page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// One sort criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub order: SortOrder,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Ascending,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Descending,
        }
    }

    /// ORM-style ordering term: `field` or `-field`.
    #[must_use]
    pub fn to_order_term(&self) -> String {
        match self.order {
            SortOrder::Ascending => self.field.clone(),
            SortOrder::Descending => format!("-{}", self.field),
        }
    }
}

/// Query parameters understood by the server paginator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

impl PageQuery {
    /// Encodes pagination, filters and sort the way the paginator expects.
    ///
    /// Empty filters and sorts are omitted rather than sent as `{}` / `[]`.
    #[must_use]
    pub fn build(pagination: &PaginationState, filters: &FilterState, sort: &[SortKey]) -> Self {
        let filter = (!filters.is_empty()).then(|| Value::Object(filters.clone()).to_string());
        let sort = (!sort.is_empty()).then(|| {
            let terms: Vec<Value> = sort.iter().map(|k| Value::String(k.to_order_term())).collect();
            Value::Array(terms).to_string()
        });

        Self {
            page: pagination.current_page,
            page_size: pagination.page_size,
            filter,
            sort,
        }
    }

    /// Flattens the query into key/value pairs for a request URL.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("page_size".to_string(), self.page_size.to_string()),
        ];
        if let Some(filter) = &self.filter {
            pairs.push(("filter".to_string(), filter.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        pairs
    }
}

/// One page of results as returned by the paginator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub items: Vec<T>,
}

impl<T: serde::de::DeserializeOwned> Page<T> {
    /// Decodes a page from a classified response payload.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InvalidInput`] if the payload is not a page.
    pub fn from_payload(payload: Value) -> Result<Self> {
        serde_json::from_value(payload)
            .map_err(|e| ConsoleError::InvalidInput(format!("payload is not a page: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clamp_snaps_up_to_allowed_sizes() {
        assert_eq!(clamp_page_size(0), 15);
        assert_eq!(clamp_page_size(15), 15);
        assert_eq!(clamp_page_size(16), 30);
        assert_eq!(clamp_page_size(50), 50);
        assert_eq!(clamp_page_size(75), 100);
        assert_eq!(clamp_page_size(500), 100);
    }

    #[test]
    fn clamp_always_lands_in_allowed_set() {
        for requested in 0..=250 {
            assert!(ALLOWED_PAGE_SIZES.contains(&clamp_page_size(requested)));
        }
    }

    #[test]
    fn from_parts_applies_defaults() {
        let state = PaginationState::from_parts(None, Some(0), None);
        assert_eq!(state, PaginationState::default());
        assert_eq!(state.page_size, 10);
    }

    #[test]
    fn total_pages_rounds_up() {
        let state = PaginationState { current_page: 3, page_size: 15, total_count: 31 };
        assert_eq!(state.total_pages(), 3);
        assert_eq!(state.offset(), 30);
        let empty = PaginationState::default();
        assert_eq!(empty.total_pages(), 1);
    }

    #[test]
    fn query_encodes_filter_and_sort_as_json_strings() {
        let mut filters = FilterState::new();
        filters.insert("status".into(), json!(1));
        let query = PageQuery::build(
            &PaginationState { current_page: 2, page_size: 30, total_count: 0 },
            &filters,
            &[SortKey::desc("created_at"), SortKey::asc("name")],
        );

        assert_eq!(query.filter.as_deref(), Some(r#"{"status":1}"#));
        assert_eq!(query.sort.as_deref(), Some(r#"["-created_at","name"]"#));
        let pairs = query.to_pairs();
        assert_eq!(pairs[0], ("page".to_string(), "2".to_string()));
        assert_eq!(pairs.len(), 4);
    }

    #[test]
    fn empty_filters_are_omitted() {
        let query = PageQuery::build(&PaginationState::default(), &FilterState::new(), &[]);
        assert!(query.filter.is_none());
        assert!(query.sort.is_none());
        assert_eq!(query.to_pairs().len(), 2);
    }

    #[test]
    fn page_decodes_from_payload() {
        let page: Page<Value> = Page::from_payload(json!({
            "current_page": 1, "page_size": 15, "total_count": 2,
            "items": [{"id": 1}, {"id": 2}]
        }))
        .unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(Page::<Value>::from_payload(json!([1, 2])).is_err());
    }
}
