//! Workbook summaries as listed for a user

use super::parse_all;
use crate::error::Result;
use crate::xml;
use chrono::{DateTime, Utc};
use roxmltree::Node;
use serde::Serialize;
use std::collections::BTreeSet;

/// A published workbook
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkbookItem {
    pub id: Option<String>,
    pub name: String,
    pub content_url: Option<String>,
    pub webpage_url: Option<String>,
    pub show_tabs: Option<bool>,
    pub size: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub project_id: Option<String>,
    pub project_name: Option<String>,
    pub owner_id: Option<String>,
    pub tags: BTreeSet<String>,
}

impl WorkbookItem {
    pub(crate) fn from_node(node: Node<'_, '_>) -> Self {
        Self {
            id: xml::attr(node, "id"),
            name: xml::attr(node, "name").unwrap_or_default(),
            content_url: xml::attr(node, "contentUrl"),
            webpage_url: xml::attr(node, "webpageUrl"),
            show_tabs: xml::attr_bool(node, "showTabs"),
            size: xml::attr_u64(node, "size"),
            created_at: xml::attr_datetime(node, "createdAt"),
            updated_at: xml::attr_datetime(node, "updatedAt"),
            project_id: xml::nested_attr(node, "project", "id"),
            project_name: xml::nested_attr(node, "project", "name"),
            owner_id: xml::nested_attr(node, "owner", "id"),
            tags: xml::find(node, "tags").map(xml::parse_tags).unwrap_or_default(),
        }
    }

    /// Every `<workbook>` in a response
    pub fn from_xml(body: &str) -> Result<Vec<Self>> {
        parse_all(body, "workbook", Self::from_node)
    }
}
