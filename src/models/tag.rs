//! Tag sets and batch tag payloads

use crate::error::Result;
use crate::types::ContentType;
use crate::xml::{self, Element};
use std::collections::BTreeSet;

/// Sorted, de-duplicated tag labels
pub type TagSet = BTreeSet<String>;

/// Labels from the first `<tags>` element of a response
pub fn tags_from_xml(body: &str) -> Result<TagSet> {
    let doc = xml::parse(body)?;
    Ok(xml::find(doc.root_element(), "tags")
        .map(xml::parse_tags)
        .unwrap_or_default())
}

/// `<tags><tag label=../>..</tags>`
pub(crate) fn tags_element(tags: &TagSet) -> Element {
    Element::new("tags").children(
        tags.iter()
            .map(|label| Element::new("tag").attr("label", label.as_str())),
    )
}

/// A content item addressed by a batch tag call
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagContent {
    pub content_type: ContentType,
    pub id: String,
}

impl TagContent {
    pub fn new(content_type: ContentType, id: impl Into<String>) -> Self {
        Self {
            content_type,
            id: id.into(),
        }
    }
}

/// `<tagBatch>` body shared by batch add and batch delete
pub(crate) fn tag_batch_element(tags: &TagSet, contents: &[TagContent]) -> Element {
    Element::new("tagBatch")
        .child(tags_element(tags))
        .child(Element::new("contents").children(contents.iter().map(|c| {
            Element::new("content")
                .attr("contentType", c.content_type.as_str())
                .attr("id", c.id.as_str())
        })))
}
