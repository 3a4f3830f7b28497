//! Site queries and administration
//!
//! Apart from creation and lookup by name, calls only act on the site the
//! session is signed in to.

use super::{encode_segment, id_segment, list_page, Scope};
use crate::error::{Error, Result};
use crate::http::RequestConfig;
use crate::models::SiteItem;
use crate::pagination::{Page, PageFetch};
use crate::query::RequestOptions;
use crate::server::Server;
use crate::types::Method;
use crate::version::Operation;
use crate::xml::{ts_request, Element};
use async_trait::async_trait;
use tracing::{debug, info};

/// Sites on the server
#[derive(Debug, Clone, Copy)]
pub struct Sites<'a> {
    server: &'a Server,
}

impl<'a> Sites<'a> {
    pub(crate) fn new(server: &'a Server) -> Self {
        Self { server }
    }

    /// One page of sites; needs server administrator rights
    pub async fn get(&self, options: Option<&RequestOptions>) -> Result<Page<SiteItem>> {
        info!("Querying all sites on server");
        let params = options.map(RequestOptions::query_params).unwrap_or_default();
        let body = self
            .server
            .send(
                Operation::SitesGet,
                Method::GET,
                Scope::Api,
                "/sites",
                RequestConfig::new().query_params(params),
            )
            .await?;
        list_page(&body, SiteItem::from_xml)
    }

    /// The signed-in site by ID
    pub async fn get_by_id(&self, site_id: &str) -> Result<SiteItem> {
        self.server.check(Operation::SitesGetById)?;
        let segment = id_segment(site_id, "Site")?;
        self.ensure_current(site_id, "retrieve")?;
        info!("Querying single site (ID: {})", site_id);
        self.fetch_one(
            Operation::SitesGetById,
            &format!("/sites/{segment}"),
            RequestConfig::new(),
        )
        .await
    }

    pub async fn get_by_name(&self, site_name: &str) -> Result<SiteItem> {
        self.server.check(Operation::SitesGetByName)?;
        if site_name.is_empty() {
            return Err(Error::invalid_argument("Site Name undefined"));
        }
        info!("Querying single site (Name: {})", site_name);
        self.fetch_one(
            Operation::SitesGetByName,
            &format!("/sites/{}", encode_segment(site_name)?),
            RequestConfig::new().query("key", "name"),
        )
        .await
    }

    /// The signed-in site by content URL
    pub async fn get_by_content_url(&self, content_url: &str) -> Result<SiteItem> {
        self.server.check(Operation::SitesGetByContentUrl)?;
        let session = self
            .server
            .session()
            .ok_or_else(|| Error::not_signed_in("sign in before querying sites"))?;
        if session.site_content_url != content_url {
            return Err(Error::invalid_argument(
                "You can only work with the site you are currently authenticated for",
            ));
        }
        info!("Querying single site (Content URL: {})", content_url);
        self.fetch_one(
            Operation::SitesGetByContentUrl,
            &format!("/sites/{}", encode_segment(content_url)?),
            RequestConfig::new().query("key", "contentUrl"),
        )
        .await
    }

    pub async fn create(&self, site: &SiteItem) -> Result<SiteItem> {
        self.server.check(Operation::SitesCreate)?;
        reject_conflicting_quota(site)?;
        let config = RequestConfig::new().xml(ts_request([site.to_element()])?);
        let body = self
            .server
            .send(Operation::SitesCreate, Method::POST, Scope::Api, "/sites", config)
            .await?;
        let created = first_site(&body)?;
        info!(
            "Created new site (ID: {})",
            created.id.as_deref().unwrap_or_default()
        );
        Ok(created)
    }

    /// Update the signed-in site
    pub async fn update(&self, site: &SiteItem) -> Result<SiteItem> {
        self.server.check(Operation::SitesUpdate)?;
        let site_id = site.id.as_deref().ok_or_else(|| Error::missing_field("id"))?;
        self.ensure_current(site_id, "update")?;
        reject_conflicting_quota(site)?;
        let config = RequestConfig::new().xml(ts_request([site.to_element()])?);
        let body = self
            .server
            .send(
                Operation::SitesUpdate,
                Method::PUT,
                Scope::Api,
                &format!("/sites/{}", encode_segment(site_id)?),
                config,
            )
            .await?;
        info!("Updated site item (ID: {})", site_id);
        first_site(&body)
    }

    /// Delete the signed-in site; the session ends with it
    pub async fn delete(&self, site_id: &str) -> Result<()> {
        self.server.check(Operation::SitesDelete)?;
        let segment = id_segment(site_id, "Site")?;
        self.ensure_current(site_id, "delete")?;
        self.server
            .send(
                Operation::SitesDelete,
                Method::DELETE,
                Scope::Api,
                &format!("/sites/{segment}"),
                RequestConfig::new(),
            )
            .await?;
        self.server.clear_auth();
        info!("Deleted single site (ID: {}) and signed out", site_id);
        Ok(())
    }

    pub async fn encrypt_extracts(&self, site_id: &str) -> Result<()> {
        self.extract_action(Operation::SitesEncryptExtracts, site_id, "encrypt-extracts")
            .await
    }

    pub async fn decrypt_extracts(&self, site_id: &str) -> Result<()> {
        self.extract_action(Operation::SitesDecryptExtracts, site_id, "decrypt-extracts")
            .await
    }

    pub async fn reencrypt_extracts(&self, site_id: &str) -> Result<()> {
        self.extract_action(
            Operation::SitesReencryptExtracts,
            site_id,
            "reencrypt-extracts",
        )
        .await
    }

    async fn extract_action(&self, operation: Operation, site_id: &str, action: &str) -> Result<()> {
        self.server.check(operation)?;
        let segment = id_segment(site_id, "Site")?;
        let config = RequestConfig::new().xml(ts_request(Vec::<Element>::new())?);
        self.server
            .send(
                operation,
                Method::POST,
                Scope::Api,
                &format!("/sites/{segment}/{action}"),
                config,
            )
            .await?;
        debug!("{} done for site {}", operation, site_id);
        Ok(())
    }

    async fn fetch_one(&self, operation: Operation, path: &str, config: RequestConfig) -> Result<SiteItem> {
        let body = self
            .server
            .send(operation, Method::GET, Scope::Api, path, config)
            .await?;
        first_site(&body)
    }

    fn ensure_current(&self, site_id: &str, action: &str) -> Result<()> {
        if self.server.site_id()? != site_id {
            return Err(Error::invalid_argument(format!(
                "You can only {action} the site you are currently authenticated for"
            )));
        }
        Ok(())
    }
}

fn reject_conflicting_quota(site: &SiteItem) -> Result<()> {
    if site.has_conflicting_quota() {
        return Err(Error::invalid_argument(
            "You cannot set admin_mode to ContentOnly and also set a user quota",
        ));
    }
    Ok(())
}

fn first_site(body: &str) -> Result<SiteItem> {
    SiteItem::from_xml(body)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::xml_parse("response has no <site> element"))
}

#[async_trait]
impl PageFetch<SiteItem> for Sites<'_> {
    async fn fetch(&self, options: &RequestOptions) -> Result<Page<SiteItem>> {
        self.get(Some(options)).await
    }
}
