//! REST endpoints
//!
//! # Overview
//!
//! Each endpoint borrows a `Server` and maps one resource collection onto
//! gated requests. List calls return a page plus its `PaginationItem`, and
//! the endpoints behind them implement `PageFetch` so they can drive a
//! `Pager` or a `QuerySet`.

mod data_alerts;
mod groupsets;
mod server_info;
mod sites;
mod tags;
mod users;

pub use data_alerts::DataAlerts;
pub use groupsets::GroupSets;
pub use server_info::ServerInfo;
pub use sites::Sites;
pub use tags::{ContentTags, Tags};
pub use users::{UserGroups, UserWorkbooks, Users};

use crate::error::{Error, Result};
use crate::pagination::{Page, PaginationItem};
use url::Url;

/// Which base URL a path is appended to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// `{address}/api/{version}`
    Api,
    /// `{address}/api/{version}/sites/{site_id}`
    Site,
}

/// Reject an empty identifier before any request is made
pub(crate) fn require_id(id: &str, what: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(Error::invalid_argument(format!("{what} ID undefined")));
    }
    Ok(())
}

/// A non-empty identifier, percent-encoded for use as one path segment
pub(crate) fn id_segment(id: &str, what: &str) -> Result<String> {
    require_id(id, what)?;
    encode_segment(id)
}

/// Items plus pagination metadata from one list response
pub(crate) fn list_page<T>(body: &str, parse: impl Fn(&str) -> Result<Vec<T>>) -> Result<Page<T>> {
    let items = parse(body)?;
    let pagination = PaginationItem::from_xml(body, items.len())?;
    Ok((items, pagination))
}

/// Percent-encode one path segment
pub(crate) fn encode_segment(segment: &str) -> Result<String> {
    let mut url = Url::parse("http://localhost/")?;
    url.path_segments_mut()
        .map_err(|()| Error::invalid_argument("cannot encode path segment"))?
        .pop_if_empty()
        .push(segment);
    Ok(url.path().trim_start_matches('/').to_string())
}
