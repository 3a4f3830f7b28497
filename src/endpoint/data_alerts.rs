//! Data alerts and their recipients

use super::{encode_segment, id_segment, list_page, require_id, Scope};
use crate::error::{Error, Result};
use crate::http::RequestConfig;
use crate::models::{DataAlertItem, UserItem};
use crate::pagination::{Page, PageFetch};
use crate::query::RequestOptions;
use crate::server::Server;
use crate::types::Method;
use crate::version::Operation;
use crate::xml::{ts_request, Element};
use async_trait::async_trait;
use tracing::info;

/// Data-driven alerts on the signed-in site
#[derive(Debug, Clone, Copy)]
pub struct DataAlerts<'a> {
    server: &'a Server,
}

impl<'a> DataAlerts<'a> {
    pub(crate) fn new(server: &'a Server) -> Self {
        Self { server }
    }

    pub async fn get(&self, options: Option<&RequestOptions>) -> Result<Page<DataAlertItem>> {
        info!("Querying all data alerts on site");
        let params = options.map(RequestOptions::query_params).unwrap_or_default();
        let body = self
            .server
            .send(
                Operation::DataAlertsGet,
                Method::GET,
                Scope::Site,
                "/dataAlerts",
                RequestConfig::new().query_params(params),
            )
            .await?;
        list_page(&body, DataAlertItem::from_xml)
    }

    pub async fn get_by_id(&self, alert_id: &str) -> Result<DataAlertItem> {
        self.server.check(Operation::DataAlertsGetById)?;
        let segment = id_segment(alert_id, "Data alert")?;
        info!("Querying single data alert (ID: {})", alert_id);
        let body = self
            .server
            .send(
                Operation::DataAlertsGetById,
                Method::GET,
                Scope::Site,
                &format!("/dataAlerts/{segment}"),
                RequestConfig::new(),
            )
            .await?;
        first_alert(&body)
    }

    pub async fn update(&self, alert: &DataAlertItem) -> Result<DataAlertItem> {
        self.server.check(Operation::DataAlertsUpdate)?;
        let alert_id = alert.id.as_deref().ok_or_else(|| Error::missing_field("id"))?;
        let config = RequestConfig::new().xml(ts_request([alert.update_element()])?);
        let body = self
            .server
            .send(
                Operation::DataAlertsUpdate,
                Method::PUT,
                Scope::Site,
                &format!("/dataAlerts/{}", encode_segment(alert_id)?),
                config,
            )
            .await?;
        info!("Updated data alert item (ID: {})", alert_id);
        first_alert(&body)
    }

    pub async fn delete(&self, alert_id: &str) -> Result<()> {
        self.server.check(Operation::DataAlertsDelete)?;
        let segment = id_segment(alert_id, "Data alert")?;
        self.server
            .send(
                Operation::DataAlertsDelete,
                Method::DELETE,
                Scope::Site,
                &format!("/dataAlerts/{segment}"),
                RequestConfig::new(),
            )
            .await?;
        info!("Deleted single data alert (ID: {})", alert_id);
        Ok(())
    }

    /// Add a recipient, returning the user as the server reports it
    pub async fn add_user_to_alert(&self, alert_id: &str, user_id: &str) -> Result<UserItem> {
        self.server.check(Operation::DataAlertsAddUser)?;
        if alert_id.is_empty() {
            return Err(Error::missing_field("id"));
        }
        require_id(user_id, "User")?;
        let config = RequestConfig::new()
            .xml(ts_request([Element::new("user").attr("id", user_id)])?);
        let body = self
            .server
            .send(
                Operation::DataAlertsAddUser,
                Method::POST,
                Scope::Site,
                &format!("/dataAlerts/{}/users", encode_segment(alert_id)?),
                config,
            )
            .await?;
        info!("Added user (ID: {}) to data alert (ID: {})", user_id, alert_id);
        UserItem::from_xml(&body)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::xml_parse("response has no <user> element"))
    }

    pub async fn delete_user_from_alert(&self, alert_id: &str, user_id: &str) -> Result<()> {
        self.server.check(Operation::DataAlertsDeleteUser)?;
        let alert_segment = id_segment(alert_id, "Data alert")?;
        let user_segment = id_segment(user_id, "User")?;
        self.server
            .send(
                Operation::DataAlertsDeleteUser,
                Method::DELETE,
                Scope::Site,
                &format!("/dataAlerts/{alert_segment}/users/{user_segment}"),
                RequestConfig::new(),
            )
            .await?;
        info!("Deleted user (ID: {}) from data alert (ID: {})", user_id, alert_id);
        Ok(())
    }
}

fn first_alert(body: &str) -> Result<DataAlertItem> {
    DataAlertItem::from_xml(body)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::xml_parse("response has no <dataAlert> element"))
}

#[async_trait]
impl PageFetch<DataAlertItem> for DataAlerts<'_> {
    async fn fetch(&self, options: &RequestOptions) -> Result<Page<DataAlertItem>> {
        self.get(Some(options)).await
    }
}
