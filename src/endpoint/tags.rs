//! Tags on content items, single-item and batch

use super::{encode_segment, id_segment, Scope};
use crate::error::{Error, Result};
use crate::http::RequestConfig;
use crate::models::{tag_batch_element, tags_element, tags_from_xml, TagContent, TagSet};
use crate::server::Server;
use crate::types::{ContentType, Method};
use crate::version::Operation;
use crate::xml::ts_request;
use tracing::info;

/// Server code for a resource type that cannot carry tags at this version
const TAGS_UNSUPPORTED_CODE: &str = "404008";

/// Version from which every content type accepts per-item tags
const PER_ITEM_TAGS_VERSION: &str = "2.6";

/// Tag calls on individual items of one content type
#[derive(Debug, Clone, Copy)]
pub struct ContentTags<'a> {
    server: &'a Server,
    content_type: ContentType,
}

impl<'a> ContentTags<'a> {
    pub(crate) fn new(server: &'a Server, content_type: ContentType) -> Self {
        Self {
            server,
            content_type,
        }
    }

    /// Add tags to an item, returning its full tag set
    pub async fn add_tags(&self, item_id: &str, tags: &TagSet) -> Result<TagSet> {
        self.server.check(Operation::TagsAdd)?;
        let segment = id_segment(item_id, "Item")?;
        let config = RequestConfig::new().xml(ts_request([tags_element(tags)])?);
        let body = self
            .server
            .send(
                Operation::TagsAdd,
                Method::PUT,
                Scope::Site,
                &format!("/{}/{segment}/tags", self.content_type.url_segment()),
                config,
            )
            .await
            .map_err(|e| self.unsupported(Operation::TagsAdd, e))?;
        tags_from_xml(&body)
    }

    /// Delete tags from an item, one request per tag
    pub async fn delete_tags(&self, item_id: &str, tags: &TagSet) -> Result<()> {
        self.server.check(Operation::TagsDelete)?;
        let segment = id_segment(item_id, "Item")?;
        for tag in tags {
            let path = format!(
                "/{}/{segment}/tags/{}",
                self.content_type.url_segment(),
                encode_segment(tag)?
            );
            self.server
                .send(
                    Operation::TagsDelete,
                    Method::DELETE,
                    Scope::Site,
                    &path,
                    RequestConfig::new(),
                )
                .await
                .map_err(|e| self.unsupported(Operation::TagsDelete, e))?;
        }
        Ok(())
    }

    /// Bring an item's tags from `current` to `desired`
    pub async fn update_tags(
        &self,
        item_id: &str,
        current: &TagSet,
        desired: &TagSet,
    ) -> Result<TagSet> {
        if current == desired {
            return Ok(desired.clone());
        }
        let removed: TagSet = current.difference(desired).cloned().collect();
        let added: TagSet = desired.difference(current).cloned().collect();
        self.delete_tags(item_id, &removed).await?;
        let tags = if added.is_empty() {
            desired.clone()
        } else {
            self.add_tags(item_id, &added).await?
        };
        info!("Updated tags to {:?}", tags);
        Ok(tags)
    }

    fn unsupported(&self, operation: Operation, err: Error) -> Error {
        if err.server_code() == Some(TAGS_UNSUPPORTED_CODE) {
            return Error::EndpointUnavailable {
                operation: format!("{}.{}", self.content_type.as_str(), operation.name()),
                required: PER_ITEM_TAGS_VERSION.to_string(),
                current: self.server.version().to_string(),
            };
        }
        err
    }
}

/// Tag many items in a single call
#[derive(Debug, Clone, Copy)]
pub struct Tags<'a> {
    server: &'a Server,
}

impl<'a> Tags<'a> {
    pub(crate) fn new(server: &'a Server) -> Self {
        Self { server }
    }

    pub async fn batch_add(&self, tags: &TagSet, contents: &[TagContent]) -> Result<TagSet> {
        self.batch(Operation::TagsBatchAdd, ":batchCreate", tags, contents)
            .await
    }

    pub async fn batch_delete(&self, tags: &TagSet, contents: &[TagContent]) -> Result<TagSet> {
        self.batch(Operation::TagsBatchDelete, ":batchDelete", tags, contents)
            .await
    }

    async fn batch(
        &self,
        operation: Operation,
        action: &str,
        tags: &TagSet,
        contents: &[TagContent],
    ) -> Result<TagSet> {
        let config = RequestConfig::new().xml(ts_request([tag_batch_element(tags, contents)])?);
        let body = self
            .server
            .send(
                operation,
                Method::PUT,
                Scope::Api,
                &format!("/tags{action}"),
                config,
            )
            .await?;
        tags_from_xml(&body)
    }
}
