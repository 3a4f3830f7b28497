//! XML marshalling
//!
//! Responses are read with `roxmltree`; elements are matched by local name so
//! the `http://tableau.com/api` namespace never has to be spelled out.
//! Request bodies are produced by the `writer` module on top of `quick-xml`.

mod writer;

pub use writer::{ts_request, Element};

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use roxmltree::{Document, Node};

/// Parse a response body
pub fn parse(body: &str) -> Result<Document<'_>> {
    Document::parse(body).map_err(|e| Error::xml_parse(e.to_string()))
}

/// Whether a body parses as XML at all
pub fn is_xml(body: &str) -> bool {
    Document::parse(body).is_ok()
}

/// First descendant (including `node` itself) with the given local name
pub fn find<'a, 'i>(node: Node<'a, 'i>, name: &str) -> Option<Node<'a, 'i>> {
    node.descendants()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

/// All descendants with the given local name, in document order
pub fn find_all<'a, 'i>(node: Node<'a, 'i>, name: &'a str) -> impl Iterator<Item = Node<'a, 'i>> {
    node.descendants()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// Direct children with the given local name
pub fn children<'a, 'i>(node: Node<'a, 'i>, name: &'a str) -> impl Iterator<Item = Node<'a, 'i>> {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// Owned attribute value
pub fn attr(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name).map(String::from)
}

/// Attribute parsed as `u64`
pub fn attr_u64(node: Node<'_, '_>, name: &str) -> Option<u64> {
    node.attribute(name).and_then(|v| v.parse().ok())
}

/// Attribute parsed as a boolean (`true` / `false`)
pub fn attr_bool(node: Node<'_, '_>, name: &str) -> Option<bool> {
    node.attribute(name).and_then(|v| v.parse().ok())
}

/// Attribute parsed as an ISO-8601 timestamp
pub fn attr_datetime(node: Node<'_, '_>, name: &str) -> Option<DateTime<Utc>> {
    node.attribute(name).and_then(parse_datetime)
}

/// `2024-01-01T12:00:00Z` → UTC timestamp
pub fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Attribute of the first descendant named `element`
pub fn nested_attr(node: Node<'_, '_>, element: &str, name: &str) -> Option<String> {
    node.descendants()
        .skip(1)
        .find(|n| n.is_element() && n.tag_name().name() == element)
        .and_then(|n| attr(n, name))
}

/// Trimmed text of the first descendant named `name`
pub fn text_of(node: Node<'_, '_>, name: &str) -> Option<String> {
    find(node, name)
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
}

/// Error block of a failed response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: String,
    pub summary: String,
    pub detail: String,
}

/// Extract `<error code=..><summary/><detail/></error>` if present
pub fn parse_error(body: &str) -> Option<ErrorBody> {
    let doc = Document::parse(body).ok()?;
    let error = find(doc.root_element(), "error")?;
    Some(ErrorBody {
        code: attr(error, "code").unwrap_or_default(),
        summary: text_of(error, "summary").unwrap_or_default(),
        detail: text_of(error, "detail").unwrap_or_default(),
    })
}

/// Tag labels under a `<tags>` element
pub fn parse_tags(node: Node<'_, '_>) -> std::collections::BTreeSet<String> {
    find_all(node, "tag")
        .filter_map(|t| attr(t, "label"))
        .collect()
}

#[cfg(test)]
mod tests;
