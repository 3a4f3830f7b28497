//! Test helpers for code that talks to a mock server

use super::Server;
use crate::auth::Session;
use crate::http::{HttpClient, HttpClientConfig};
use crate::version::ApiVersion;

pub(crate) const TOKEN: &str = "tok-123";
pub(crate) const SITE_ID: &str = "site-1";
pub(crate) const SITE_CONTENT_URL: &str = "sales";
pub(crate) const USER_ID: &str = "user-1";

pub(crate) const SIGN_IN_XML: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<tsResponse xmlns="http://tableau.com/api">
  <credentials token="tok-123">
    <site id="site-1" contentUrl="sales"/>
    <user id="user-1"/>
  </credentials>
</tsResponse>"#;

/// A server pointed at `address` with retries disabled
pub(crate) fn server(address: &str, version: ApiVersion) -> Server {
    let config = HttpClientConfig::builder().max_retries(0).build();
    let http = HttpClient::with_config(config).unwrap();
    let server = Server::with_http_client(address, http).unwrap();
    server.set_version(version);
    server
}

/// Same as [`server`], already holding a session
pub(crate) fn signed_in(address: &str, version: ApiVersion) -> Server {
    let server = server(address, version);
    server.set_session(Some(Session {
        token: TOKEN.to_string(),
        site_id: SITE_ID.to_string(),
        site_content_url: SITE_CONTENT_URL.to_string(),
        user_id: USER_ID.to_string(),
    }));
    server
}
