//! User records

use super::parse_all;
use crate::error::Result;
use crate::query::{FieldSpec, Queryable, USER_FIELDS};
use crate::xml::{self, Element};
use chrono::{DateTime, Utc};
use roxmltree::Node;
use serde::Serialize;

/// A user on the current site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserItem {
    pub id: Option<String>,
    pub name: Option<String>,
    pub site_role: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub auth_setting: Option<String>,
    pub domain_name: Option<String>,
    pub external_auth_user_id: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub locale: Option<String>,
    pub language: Option<String>,
    pub idp_configuration_id: Option<String>,
}

impl UserItem {
    pub fn new(name: impl Into<String>, site_role: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            site_role: Some(site_role.into()),
            ..Default::default()
        }
    }

    pub(crate) fn from_node(node: Node<'_, '_>) -> Self {
        Self {
            id: xml::attr(node, "id"),
            name: xml::attr(node, "name"),
            site_role: xml::attr(node, "siteRole"),
            full_name: xml::attr(node, "fullName"),
            email: xml::attr(node, "email"),
            auth_setting: xml::attr(node, "authSetting"),
            domain_name: xml::nested_attr(node, "domain", "name"),
            external_auth_user_id: xml::attr(node, "externalAuthUserId"),
            last_login: xml::attr_datetime(node, "lastLogin"),
            locale: xml::attr(node, "locale"),
            language: xml::attr(node, "language"),
            idp_configuration_id: xml::attr(node, "idpConfigurationId"),
        }
    }

    /// Every `<user>` in a response
    pub fn from_xml(body: &str) -> Result<Vec<Self>> {
        parse_all(body, "user", Self::from_node)
    }

    /// `<user>` element for an add request
    pub(crate) fn add_element(&self) -> Element {
        Element::new("user")
            .attr_opt("name", self.name.as_deref())
            .attr_opt("siteRole", self.site_role.as_deref())
            .attr_opt("authSetting", self.auth_setting.as_deref())
            .attr_opt("idpConfigurationId", self.idp_configuration_id.as_deref())
    }

    /// `<user>` element for an update request
    pub(crate) fn update_element(&self, password: Option<&str>) -> Element {
        Element::new("user")
            .attr_opt("fullName", self.full_name.as_deref())
            .attr_opt("email", self.email.as_deref())
            .attr_opt("siteRole", self.site_role.as_deref())
            .attr_opt("authSetting", self.auth_setting.as_deref())
            .attr_opt("idpConfigurationId", self.idp_configuration_id.as_deref())
            .attr_opt("password", password)
    }

    /// Fields the server echoes back after an update, applied over a copy
    pub(crate) fn merge_update(&self, updated: &UserItem) -> UserItem {
        let mut merged = self.clone();
        let take = |ours: &mut Option<String>, theirs: &Option<String>| {
            if theirs.is_some() {
                ours.clone_from(theirs);
            }
        };
        take(&mut merged.name, &updated.name);
        take(&mut merged.site_role, &updated.site_role);
        take(&mut merged.full_name, &updated.full_name);
        take(&mut merged.email, &updated.email);
        take(&mut merged.auth_setting, &updated.auth_setting);
        merged
    }
}

impl Queryable for UserItem {
    const RESOURCE: &'static str = "users";

    fn fields() -> &'static [FieldSpec] {
        USER_FIELDS
    }
}
