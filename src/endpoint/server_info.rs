//! Server build and REST API version

use crate::error::Result;
use crate::http::RequestConfig;
use crate::models::ServerInfoItem;
use crate::server::Server;
use crate::types::Method;
use crate::version::Operation;

/// Product and REST API version of the server; needs no session
#[derive(Debug, Clone, Copy)]
pub struct ServerInfo<'a> {
    server: &'a Server,
}

impl<'a> ServerInfo<'a> {
    pub(crate) fn new(server: &'a Server) -> Self {
        Self { server }
    }

    pub async fn get(&self) -> Result<ServerInfoItem> {
        let body = self
            .server
            .send_unauthenticated(
                Operation::ServerInfoGet,
                Method::GET,
                "/serverInfo",
                RequestConfig::new(),
            )
            .await?;
        ServerInfoItem::from_xml(&body)
    }
}
