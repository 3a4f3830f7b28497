//! Group sets (REST API 3.22 and later)

use super::{encode_segment, id_segment, list_page, Scope};
use crate::error::{Error, Result};
use crate::http::RequestConfig;
use crate::models::{GroupSetItem, ResultLevel};
use crate::pagination::{Page, PageFetch};
use crate::query::{FilterValue, QuerySet, RequestOptions};
use crate::server::Server;
use crate::types::Method;
use crate::version::Operation;
use crate::xml::ts_request;
use async_trait::async_trait;
use tracing::info;

/// Group sets on the signed-in site
#[derive(Debug, Clone, Copy)]
pub struct GroupSets<'a> {
    server: &'a Server,
}

impl<'a> GroupSets<'a> {
    pub(crate) fn new(server: &'a Server) -> Self {
        Self { server }
    }

    pub async fn get(
        &self,
        options: Option<&RequestOptions>,
        result_level: Option<ResultLevel>,
    ) -> Result<Page<GroupSetItem>> {
        info!("Querying all group sets on site");
        let mut config = RequestConfig::new();
        if let Some(level) = result_level {
            config = config.query("resultlevel", level.as_str());
        }
        if let Some(options) = options {
            config = config.query_params(options.query_params());
        }
        let body = self
            .server
            .send(Operation::GroupSetsGet, Method::GET, Scope::Site, "/groupsets", config)
            .await?;
        list_page(&body, GroupSetItem::from_xml)
    }

    pub fn all(&self) -> QuerySet<'_, GroupSetItem> {
        QuerySet::new(self)
    }

    pub fn filter(
        &self,
        key: &str,
        value: impl Into<FilterValue>,
    ) -> Result<QuerySet<'_, GroupSetItem>> {
        self.all().filter(key, value)
    }

    pub async fn get_by_id(&self, groupset_id: &str) -> Result<GroupSetItem> {
        self.server.check(Operation::GroupSetsGetById)?;
        let segment = id_segment(groupset_id, "Group set")?;
        info!("Querying group set (ID: {})", groupset_id);
        let body = self
            .server
            .send(
                Operation::GroupSetsGetById,
                Method::GET,
                Scope::Site,
                &format!("/groupsets/{segment}"),
                RequestConfig::new(),
            )
            .await?;
        first_groupset(&body)
    }

    pub async fn create(&self, groupset: &GroupSetItem) -> Result<GroupSetItem> {
        info!("Creating group set (name: {})", groupset.name);
        let config = RequestConfig::new().xml(ts_request([groupset.to_element()])?);
        let body = self
            .server
            .send(Operation::GroupSetsCreate, Method::POST, Scope::Site, "/groupsets", config)
            .await?;
        first_groupset(&body)
    }

    pub async fn update(&self, groupset: &GroupSetItem) -> Result<GroupSetItem> {
        self.server.check(Operation::GroupSetsUpdate)?;
        let id = groupset.id.as_deref().ok_or_else(|| Error::missing_field("id"))?;
        info!("Updating group set (ID: {})", id);
        let config = RequestConfig::new().xml(ts_request([groupset.to_element()])?);
        let body = self
            .server
            .send(
                Operation::GroupSetsUpdate,
                Method::PUT,
                Scope::Site,
                &format!("/groupsets/{}", encode_segment(id)?),
                config,
            )
            .await?;
        first_groupset(&body)
    }

    pub async fn delete(&self, groupset_id: &str) -> Result<()> {
        self.server.check(Operation::GroupSetsDelete)?;
        let segment = id_segment(groupset_id, "Group set")?;
        info!("Deleting group set (ID: {})", groupset_id);
        self.server
            .send(
                Operation::GroupSetsDelete,
                Method::DELETE,
                Scope::Site,
                &format!("/groupsets/{segment}"),
                RequestConfig::new(),
            )
            .await?;
        Ok(())
    }

    pub async fn add_group(&self, groupset_id: &str, group_id: &str) -> Result<()> {
        self.membership(Operation::GroupSetsAddGroup, Method::PUT, groupset_id, group_id)
            .await
    }

    pub async fn remove_group(&self, groupset_id: &str, group_id: &str) -> Result<()> {
        self.membership(
            Operation::GroupSetsRemoveGroup,
            Method::DELETE,
            groupset_id,
            group_id,
        )
        .await
    }

    async fn membership(
        &self,
        operation: Operation,
        method: Method,
        groupset_id: &str,
        group_id: &str,
    ) -> Result<()> {
        self.server.check(operation)?;
        let groupset_segment = id_segment(groupset_id, "Group set")?;
        let group_segment = id_segment(group_id, "Group")?;
        info!(
            "{} group (ID: {}) on group set (ID: {})",
            operation, group_id, groupset_id
        );
        self.server
            .send(
                operation,
                method,
                Scope::Site,
                &format!("/groupsets/{groupset_segment}/groups/{group_segment}"),
                RequestConfig::new(),
            )
            .await?;
        Ok(())
    }
}

fn first_groupset(body: &str) -> Result<GroupSetItem> {
    GroupSetItem::from_xml(body)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::xml_parse("response has no <groupSet> element"))
}

#[async_trait]
impl PageFetch<GroupSetItem> for GroupSets<'_> {
    async fn fetch(&self, options: &RequestOptions) -> Result<Page<GroupSetItem>> {
        self.get(Some(options), None).await
    }
}
