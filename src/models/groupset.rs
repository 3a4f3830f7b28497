//! Group sets and the groups they contain

use super::group::GroupItem;
use super::parse_all;
use crate::error::Result;
use crate::query::{FieldSpec, Queryable, GROUP_SET_FIELDS};
use crate::xml::{self, Element};
use roxmltree::Node;
use serde::Serialize;

/// How much of each group set a listing returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultLevel {
    /// Include member groups
    Members,
    /// Group set attributes only
    Local,
}

impl ResultLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultLevel::Members => "members",
            ResultLevel::Local => "local",
        }
    }
}

/// A named collection of groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupSetItem {
    pub id: Option<String>,
    pub name: String,
    pub group_count: u64,
    pub groups: Vec<GroupItem>,
}

impl GroupSetItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub(crate) fn from_node(node: Node<'_, '_>) -> Self {
        let groups: Vec<GroupItem> = xml::children(node, "group")
            .map(GroupItem::from_node)
            .collect();
        Self {
            id: xml::attr(node, "id"),
            name: xml::attr(node, "name").unwrap_or_default(),
            group_count: xml::attr_u64(node, "groupCount").unwrap_or(groups.len() as u64),
            groups,
        }
    }

    /// Every `<groupSet>` in a response
    pub fn from_xml(body: &str) -> Result<Vec<Self>> {
        parse_all(body, "groupSet", Self::from_node)
    }

    pub(crate) fn to_element(&self) -> Element {
        Element::new("groupSet").attr("name", self.name.as_str())
    }
}

impl Queryable for GroupSetItem {
    const RESOURCE: &'static str = "groupsets";

    fn fields() -> &'static [FieldSpec] {
        GROUP_SET_FIELDS
    }
}
