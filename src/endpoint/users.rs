//! Users on the signed-in site, with their workbooks and groups

use super::{encode_segment, id_segment, list_page, require_id, Scope};
use crate::bulk::BulkOutcome;
use crate::error::{Error, Result};
use crate::http::RequestConfig;
use crate::models::{GroupItem, UserItem, WorkbookItem};
use crate::pagination::{Page, PageFetch, Pager};
use crate::query::{FilterArg, FilterValue, QuerySet, RequestOptions};
use crate::server::Server;
use crate::types::Method;
use crate::version::Operation;
use crate::xml::ts_request;
use async_trait::async_trait;
use tracing::info;

/// Users on the signed-in site
#[derive(Debug, Clone, Copy)]
pub struct Users<'a> {
    server: &'a Server,
}

impl<'a> Users<'a> {
    pub(crate) fn new(server: &'a Server) -> Self {
        Self { server }
    }

    /// One page of users, always with every field
    pub async fn get(&self, options: Option<&RequestOptions>) -> Result<Page<UserItem>> {
        info!("Querying all users on site");
        let options = options.cloned().unwrap_or_default().with_all_fields();
        let config = RequestConfig::new().query_params(options.query_params());
        let body = self
            .server
            .send(Operation::UsersGet, Method::GET, Scope::Site, "/users", config)
            .await?;
        list_page(&body, UserItem::from_xml)
    }

    /// Query over every user
    pub fn all(&self) -> QuerySet<'_, UserItem> {
        QuerySet::new(self)
    }

    /// Query filtered by one keyword, e.g. `site_role__in`
    pub fn filter(&self, key: &str, value: impl Into<FilterValue>) -> Result<QuerySet<'_, UserItem>> {
        self.all().filter(key, value)
    }

    /// Query filtered by parsed `key=value` arguments
    pub fn filter_args(
        &self,
        args: impl IntoIterator<Item = FilterArg>,
    ) -> Result<QuerySet<'_, UserItem>> {
        self.all().filter_args(args)
    }

    pub async fn get_by_id(&self, user_id: &str) -> Result<UserItem> {
        self.server.check(Operation::UsersGetById)?;
        let segment = id_segment(user_id, "User")?;
        info!("Querying single user (ID: {})", user_id);
        let body = self
            .server
            .send(
                Operation::UsersGetById,
                Method::GET,
                Scope::Site,
                &format!("/users/{segment}"),
                RequestConfig::new(),
            )
            .await?;
        first_user(&body)
    }

    pub async fn add(&self, user: &UserItem) -> Result<UserItem> {
        info!("Add user {}", user.name.as_deref().unwrap_or_default());
        let config = RequestConfig::new().xml(ts_request([user.add_element()])?);
        let body = self
            .server
            .send(Operation::UsersAdd, Method::POST, Scope::Site, "/users", config)
            .await?;
        let created = first_user(&body)?;
        info!(
            "Added new user (ID: {})",
            created.id.as_deref().unwrap_or_default()
        );
        Ok(created)
    }

    /// Add each user in turn; failures are collected rather than raised
    pub async fn add_all(&self, users: Vec<UserItem>) -> Result<BulkOutcome<UserItem, UserItem>> {
        self.server.check(Operation::UsersAddAll)?;
        Ok(BulkOutcome::collect(users, |user| async move { self.add(&user).await }).await)
    }

    /// Update a user, optionally setting a new password
    pub async fn update(&self, user: &UserItem, password: Option<&str>) -> Result<UserItem> {
        self.server.check(Operation::UsersUpdate)?;
        let user_id = user.id.as_deref().ok_or_else(|| Error::missing_field("id"))?;
        let config = RequestConfig::new().xml(ts_request([user.update_element(password)])?);
        let body = self
            .server
            .send(
                Operation::UsersUpdate,
                Method::PUT,
                Scope::Site,
                &format!("/users/{}", encode_segment(user_id)?),
                config,
            )
            .await?;
        info!("Updated user item (ID: {})", user_id);
        Ok(user.merge_update(&first_user(&body)?))
    }

    /// Remove a user, handing their content to `map_assets_to` if given
    pub async fn remove(&self, user_id: &str, map_assets_to: Option<&str>) -> Result<()> {
        self.server.check(Operation::UsersRemove)?;
        let segment = id_segment(user_id, "User")?;
        let mut config = RequestConfig::new();
        if let Some(target) = map_assets_to {
            config = config.query("mapAssetsTo", target);
        }
        self.server
            .send(
                Operation::UsersRemove,
                Method::DELETE,
                Scope::Site,
                &format!("/users/{segment}"),
                config,
            )
            .await?;
        info!("Removed single user (ID: {})", user_id);
        Ok(())
    }

    /// Paged access to the workbooks a user owns
    pub fn workbooks(&self, user_id: &str) -> Result<UserWorkbooks<'a>> {
        self.server.check(Operation::UsersPopulateWorkbooks)?;
        require_id(user_id, "User")?;
        Ok(UserWorkbooks {
            server: self.server,
            user_id: user_id.to_string(),
        })
    }

    /// Paged access to the groups a user belongs to
    pub fn groups(&self, user_id: &str) -> Result<UserGroups<'a>> {
        self.server.check(Operation::UsersPopulateGroups)?;
        require_id(user_id, "User")?;
        Ok(UserGroups {
            server: self.server,
            user_id: user_id.to_string(),
        })
    }
}

fn first_user(body: &str) -> Result<UserItem> {
    UserItem::from_xml(body)?
        .pop()
        .ok_or_else(|| Error::xml_parse("response has no <user> element"))
}

#[async_trait]
impl PageFetch<UserItem> for Users<'_> {
    async fn fetch(&self, options: &RequestOptions) -> Result<Page<UserItem>> {
        self.get(Some(options)).await
    }
}

/// Workbooks owned by one user
#[derive(Debug, Clone)]
pub struct UserWorkbooks<'a> {
    server: &'a Server,
    user_id: String,
}

impl UserWorkbooks<'_> {
    pub fn pager(&self) -> Pager<'_, WorkbookItem> {
        Pager::new(self)
    }

    pub fn pager_with(&self, options: RequestOptions) -> Result<Pager<'_, WorkbookItem>> {
        Pager::with_options(self, options)
    }
}

#[async_trait]
impl PageFetch<WorkbookItem> for UserWorkbooks<'_> {
    async fn fetch(&self, options: &RequestOptions) -> Result<Page<WorkbookItem>> {
        let config = RequestConfig::new().query_params(options.query_params());
        let body = self
            .server
            .send(
                Operation::UsersPopulateWorkbooks,
                Method::GET,
                Scope::Site,
                &format!("/users/{}/workbooks", encode_segment(&self.user_id)?),
                config,
            )
            .await?;
        info!("Populated workbooks for user (ID: {})", self.user_id);
        list_page(&body, WorkbookItem::from_xml)
    }
}

/// Groups one user belongs to
#[derive(Debug, Clone)]
pub struct UserGroups<'a> {
    server: &'a Server,
    user_id: String,
}

impl UserGroups<'_> {
    pub fn pager(&self) -> Pager<'_, GroupItem> {
        Pager::new(self)
    }

    pub fn pager_with(&self, options: RequestOptions) -> Result<Pager<'_, GroupItem>> {
        Pager::with_options(self, options)
    }
}

#[async_trait]
impl PageFetch<GroupItem> for UserGroups<'_> {
    async fn fetch(&self, options: &RequestOptions) -> Result<Page<GroupItem>> {
        let config = RequestConfig::new().query_params(options.query_params());
        let body = self
            .server
            .send(
                Operation::UsersPopulateGroups,
                Method::GET,
                Scope::Site,
                &format!("/users/{}/groups", encode_segment(&self.user_id)?),
                config,
            )
            .await?;
        info!("Populated groups for user (ID: {})", self.user_id);
        list_page(&body, GroupItem::from_xml)
    }
}
