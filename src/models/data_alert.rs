//! Data alerts

use super::parse_all;
use crate::error::Result;
use crate::xml::{self, Element};
use chrono::{DateTime, Utc};
use roxmltree::Node;
use serde::Serialize;

/// How often a data alert is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertFrequency {
    Once,
    Frequently,
    Hourly,
    Daily,
    Weekly,
}

impl AlertFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertFrequency::Once => "once",
            AlertFrequency::Frequently => "frequently",
            AlertFrequency::Hourly => "hourly",
            AlertFrequency::Daily => "daily",
            AlertFrequency::Weekly => "weekly",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "once" => Some(AlertFrequency::Once),
            "frequently" => Some(AlertFrequency::Frequently),
            "hourly" => Some(AlertFrequency::Hourly),
            "daily" => Some(AlertFrequency::Daily),
            "weekly" => Some(AlertFrequency::Weekly),
            _ => None,
        }
    }
}

/// A threshold alert on a view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataAlertItem {
    pub id: Option<String>,
    pub subject: Option<String>,
    pub creator_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub frequency: Option<AlertFrequency>,
    pub public: Option<bool>,
    pub owner_id: Option<String>,
    pub owner_name: Option<String>,
    pub view_id: Option<String>,
    pub view_name: Option<String>,
    pub workbook_id: Option<String>,
    pub workbook_name: Option<String>,
    pub project_id: Option<String>,
    pub project_name: Option<String>,
    pub recipients: Vec<String>,
}

impl DataAlertItem {
    pub(crate) fn from_node(node: Node<'_, '_>) -> Self {
        let view = xml::find(node, "view");
        let view_attr = |element: &str, name: &str| view.and_then(|v| xml::nested_attr(v, element, name));
        Self {
            id: xml::attr(node, "id"),
            subject: xml::attr(node, "subject"),
            creator_id: xml::attr(node, "creatorId"),
            created_at: xml::attr_datetime(node, "createdAt"),
            updated_at: xml::attr_datetime(node, "updatedAt"),
            frequency: node.attribute("frequency").and_then(AlertFrequency::parse),
            public: xml::attr_bool(node, "public"),
            owner_id: xml::nested_attr(node, "owner", "id"),
            owner_name: xml::nested_attr(node, "owner", "name"),
            view_id: view.and_then(|v| xml::attr(v, "id")),
            view_name: view.and_then(|v| xml::attr(v, "name")),
            workbook_id: view_attr("workbook", "id"),
            workbook_name: view_attr("workbook", "name"),
            project_id: view_attr("project", "id"),
            project_name: view_attr("project", "name"),
            recipients: xml::find_all(node, "recipient")
                .filter_map(|r| xml::attr(r, "id"))
                .collect(),
        }
    }

    /// Every `<dataAlert>` in a response
    pub fn from_xml(body: &str) -> Result<Vec<Self>> {
        parse_all(body, "dataAlert", Self::from_node)
    }

    pub(crate) fn update_element(&self) -> Element {
        let mut element = Element::new("dataAlert")
            .attr_opt("subject", self.subject.as_deref())
            .attr_opt("frequency", self.frequency.map(|f| f.as_str()))
            .attr_opt("public", self.public);
        if let Some(ref owner) = self.owner_id {
            element = element.child(Element::new("owner").attr("id", owner.as_str()));
        }
        element
    }
}
