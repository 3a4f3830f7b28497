//! Request options: paging, filtering and sorting for list calls

use super::filter::{Filter, Sort};
use crate::error::{Error, Result};
use crate::types::QueryParams;

/// Smallest page size the server accepts
pub const MIN_PAGE_SIZE: u32 = 1;
/// Largest page size the server accepts
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Paging, filter and sort state for a single list request
///
/// Filters are keyed by field: adding a second filter on the same field
/// replaces the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    page_number: u32,
    page_size: Option<u32>,
    filters: Vec<Filter>,
    sorts: Vec<Sort>,
    all_fields: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: None,
            filters: Vec::new(),
            sorts: Vec::new(),
            all_fields: false,
        }
    }
}

impl RequestOptions {
    /// Options for the first page at the server's default page size
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size, rejecting values outside `[1, 1000]`
    pub fn with_page_size(mut self, page_size: i64) -> Result<Self> {
        self.page_size = Some(validate_page_size(page_size)?);
        Ok(self)
    }

    /// Set the page number (1-based)
    pub fn with_page_number(mut self, page_number: u32) -> Result<Self> {
        if page_number == 0 {
            return Err(Error::invalid_argument("page number starts at 1"));
        }
        self.page_number = page_number;
        Ok(self)
    }

    /// Add a filter, replacing any existing filter on the same field
    #[must_use]
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.set_filter(filter);
        self
    }

    /// Add a sort clause
    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    /// Ask the server for every field of each item
    #[must_use]
    pub fn with_all_fields(mut self) -> Self {
        self.all_fields = true;
        self
    }

    pub(crate) fn set_filter(&mut self, filter: Filter) {
        match self.filters.iter_mut().find(|f| f.field == filter.field) {
            Some(existing) => *existing = filter,
            None => self.filters.push(filter),
        }
    }

    pub(crate) fn set_sorts(&mut self, sorts: Vec<Sort>) {
        self.sorts = sorts;
    }

    pub(crate) fn set_page_size(&mut self, page_size: u32) {
        self.page_size = Some(page_size);
    }

    pub(crate) fn set_page_number(&mut self, page_number: u32) {
        self.page_number = page_number.max(1);
    }

    pub(crate) fn set_all_fields(&mut self, all_fields: bool) {
        self.all_fields = all_fields;
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn sorts(&self) -> &[Sort] {
        &self.sorts
    }

    pub fn all_fields(&self) -> bool {
        self.all_fields
    }

    /// Re-check the invariants before a request goes out
    pub fn validate(&self) -> Result<()> {
        if let Some(size) = self.page_size {
            validate_page_size(i64::from(size))?;
        }
        if self.page_number == 0 {
            return Err(Error::invalid_argument("page number starts at 1"));
        }
        Ok(())
    }

    /// Query parameters in wire order: pageNumber, pageSize, sort, filter, fields
    pub fn query_params(&self) -> QueryParams {
        let mut params = vec![("pageNumber".to_string(), self.page_number.to_string())];
        if let Some(size) = self.page_size {
            params.push(("pageSize".to_string(), size.to_string()));
        }
        if !self.sorts.is_empty() {
            params.push(("sort".to_string(), join(&self.sorts)));
        }
        if !self.filters.is_empty() {
            params.push(("filter".to_string(), join(&self.filters)));
        }
        if self.all_fields {
            params.push(("fields".to_string(), "_all_".to_string()));
        }
        params
    }

    /// Unencoded query string, e.g. `pageNumber=1&filter=name:eq:bob`
    pub fn to_query_string(&self) -> String {
        self.query_params()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Check a page size against `[MIN_PAGE_SIZE, MAX_PAGE_SIZE]`
pub fn validate_page_size(page_size: i64) -> Result<u32> {
    if page_size < i64::from(MIN_PAGE_SIZE) || page_size > i64::from(MAX_PAGE_SIZE) {
        return Err(Error::InvalidPageSize { page_size });
    }
    Ok(page_size as u32)
}
