//! Pagination types and traits
//!
//! Defines the page metadata and the page-fetch capability a `Pager` drives.

use crate::error::Result;
use crate::query::RequestOptions;
use crate::xml;
use async_trait::async_trait;
use serde::Serialize;

/// Page metadata reported by the server for one list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationItem {
    page_number: u32,
    page_size: u32,
    total_available: u64,
}

impl PaginationItem {
    pub fn new(page_number: u32, page_size: u32, total_available: u64) -> Self {
        Self {
            page_number,
            page_size,
            total_available,
        }
    }

    /// Metadata for a response that was not paginated at all
    pub fn single_page(item_count: usize) -> Self {
        Self {
            page_number: 1,
            page_size: item_count as u32,
            total_available: item_count as u64,
        }
    }

    /// Read `<pagination pageNumber= pageSize= totalAvailable=/>`
    ///
    /// Falls back to a single page of `item_count` when the element is absent.
    pub fn from_xml(body: &str, item_count: usize) -> Result<Self> {
        let doc = xml::parse(body)?;
        let Some(node) = xml::find(doc.root_element(), "pagination") else {
            return Ok(Self::single_page(item_count));
        };
        Ok(Self {
            page_number: xml::attr_u64(node, "pageNumber").unwrap_or(1) as u32,
            page_size: xml::attr_u64(node, "pageSize").unwrap_or(item_count as u64) as u32,
            total_available: xml::attr_u64(node, "totalAvailable").unwrap_or(item_count as u64),
        })
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_available(&self) -> u64 {
        self.total_available
    }
}

/// One page of items plus its metadata
pub type Page<T> = (Vec<T>, PaginationItem);

/// Capability to fetch one page of a collection
///
/// Endpoints implement this for their list calls; a `Pager` only borrows it.
#[async_trait]
pub trait PageFetch<T>: Send + Sync {
    /// Fetch the page described by `options`
    async fn fetch(&self, options: &RequestOptions) -> Result<Page<T>>;
}
