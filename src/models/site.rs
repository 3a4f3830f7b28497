//! Site records and their quota settings

use super::parse_all;
use crate::error::Result;
use crate::types::AdminMode;
use crate::xml::{self, Element};
use roxmltree::Node;
use serde::Serialize;

/// Whether a site is usable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SiteState {
    Active,
    Suspended,
}

impl SiteState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteState::Active => "Active",
            SiteState::Suspended => "Suspended",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(SiteState::Active),
            "Suspended" => Some(SiteState::Suspended),
            _ => None,
        }
    }
}

/// A site on the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteItem {
    pub id: Option<String>,
    pub name: String,
    pub content_url: String,
    pub admin_mode: Option<AdminMode>,
    pub state: Option<SiteState>,
    pub user_quota: Option<u64>,
    pub storage_quota: Option<u64>,
    pub disable_subscriptions: Option<bool>,
    pub revision_history_enabled: Option<bool>,
    pub revision_limit: Option<u64>,
}

impl SiteItem {
    pub fn new(name: impl Into<String>, content_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_url: content_url.into(),
            ..Default::default()
        }
    }

    pub(crate) fn from_node(node: Node<'_, '_>) -> Self {
        Self {
            id: xml::attr(node, "id"),
            name: xml::attr(node, "name").unwrap_or_default(),
            content_url: xml::attr(node, "contentUrl").unwrap_or_default(),
            admin_mode: node.attribute("adminMode").and_then(AdminMode::parse),
            state: node.attribute("state").and_then(SiteState::parse),
            user_quota: xml::attr_u64(node, "userQuota"),
            storage_quota: xml::attr_u64(node, "storageQuota"),
            disable_subscriptions: xml::attr_bool(node, "disableSubscriptions"),
            revision_history_enabled: xml::attr_bool(node, "revisionHistoryEnabled"),
            revision_limit: xml::attr_u64(node, "revisionLimit"),
        }
    }

    /// Every `<site>` in a response
    pub fn from_xml(body: &str) -> Result<Vec<Self>> {
        parse_all(body, "site", Self::from_node)
    }

    /// ContentOnly sites cannot carry a user quota
    pub(crate) fn has_conflicting_quota(&self) -> bool {
        self.admin_mode == Some(AdminMode::ContentOnly) && self.user_quota.is_some()
    }

    /// `<site>` element for create and update requests
    pub(crate) fn to_element(&self) -> Element {
        Element::new("site")
            .attr("name", self.name.as_str())
            .attr("contentUrl", self.content_url.as_str())
            .attr_opt("adminMode", self.admin_mode.map(|m| m.as_str()))
            .attr_opt("state", self.state.map(|s| s.as_str()))
            .attr_opt("userQuota", self.user_quota)
            .attr_opt("storageQuota", self.storage_quota)
            .attr_opt("disableSubscriptions", self.disable_subscriptions)
            .attr_opt("revisionHistoryEnabled", self.revision_history_enabled)
            .attr_opt("revisionLimit", self.revision_limit)
    }
}
