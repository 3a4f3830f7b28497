//! Pagination module
//!
//! # Overview
//!
//! List endpoints return one page at a time together with a
//! `<pagination>` block. The `Pager` turns a page-fetch capability into a
//! lazy sequence of items spanning every page, stopping once the server's
//! `totalAvailable` count has been reached.

mod pager;
mod types;

pub use pager::Pager;
pub use types::{Page, PageFetch, PaginationItem};

#[cfg(test)]
pub(crate) mod testing;

#[cfg(test)]
mod tests;
