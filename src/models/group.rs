//! Group records

use super::parse_all;
use crate::error::Result;
use crate::xml;
use roxmltree::Node;
use serde::Serialize;

/// A group of users
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupItem {
    pub id: Option<String>,
    pub name: String,
    pub domain_name: Option<String>,
    pub minimum_site_role: Option<String>,
    pub user_count: Option<u64>,
}

impl GroupItem {
    pub(crate) fn from_node(node: Node<'_, '_>) -> Self {
        Self {
            id: xml::attr(node, "id"),
            name: xml::attr(node, "name").unwrap_or_default(),
            domain_name: xml::nested_attr(node, "domain", "name"),
            minimum_site_role: xml::nested_attr(node, "import", "siteRole"),
            user_count: xml::attr_u64(node, "userCount"),
        }
    }

    /// Every `<group>` in a response
    pub fn from_xml(body: &str) -> Result<Vec<Self>> {
        parse_all(body, "group", Self::from_node)
    }
}
