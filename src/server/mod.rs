//! Server handle
//!
//! # Overview
//!
//! A `Server` owns the HTTP client, the negotiated REST API version and the
//! current session. Every endpoint call goes through [`Server::send`], which
//! checks the operation against the negotiated version before any request is
//! built, so an unsupported call never reaches the network.

use crate::auth::{switch_site_request_xml, Session, TableauAuth};
use crate::endpoint::{
    ContentTags, DataAlerts, GroupSets, Scope, ServerInfo, Sites, Tags, Users,
};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::{ContentType, Method};
use crate::version::{self, ApiVersion, Operation, DEFAULT_API_VERSION};
use crate::xml;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info, warn};
use url::Url;

/// Product version → REST API version for servers without `serverInfo`
const PRODUCT_TO_REST_VERSION: &[(&str, ApiVersion)] = &[
    ("10.0", ApiVersion::new(2, 3)),
    ("9.3", ApiVersion::new(2, 2)),
    ("9.2", ApiVersion::new(2, 1)),
    ("9.1", ApiVersion::new(2, 0)),
    ("9.0", ApiVersion::new(2, 0)),
];

/// Lowest version assumed for a legacy server that cannot be identified
const MINIMUM_LEGACY_VERSION: ApiVersion = ApiVersion::new(2, 0);

/// Connection to one Tableau Server or Tableau Cloud pod
#[derive(Debug)]
pub struct Server {
    address: String,
    http: HttpClient,
    version: RwLock<ApiVersion>,
    session: RwLock<Option<Session>>,
}

impl Server {
    /// Create a server handle with a default HTTP client
    pub fn new(address: &str) -> Result<Self> {
        Self::with_http_client(address, HttpClient::new()?)
    }

    /// Create a server handle around a configured HTTP client
    pub fn with_http_client(address: &str, http: HttpClient) -> Result<Self> {
        let parsed = Url::parse(address)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::invalid_argument(format!(
                "server address must be http or https, got '{address}'"
            )));
        }
        Ok(Self {
            address: address.trim_end_matches('/').to_string(),
            http,
            version: RwLock::new(DEFAULT_API_VERSION),
            session: RwLock::new(None),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn version(&self) -> ApiVersion {
        *self.version.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pin the REST API version requests are sent with
    pub fn set_version(&self, version: ApiVersion) {
        *self.version.write().unwrap_or_else(PoisonError::into_inner) = version;
    }

    /// `{address}/api/{version}`
    pub fn baseurl(&self) -> String {
        format!("{}/api/{}", self.address, self.version())
    }

    /// `{address}/api/{version}/sites/{site_id}`
    pub fn site_baseurl(&self) -> Result<String> {
        Ok(format!("{}/sites/{}", self.baseurl(), self.site_id()?))
    }

    /// Fail unless `operation` is available at the negotiated version
    pub fn check(&self, operation: Operation) -> Result<()> {
        version::check(operation, self.version())
    }

    // ========================================================================
    // Session
    // ========================================================================

    pub fn session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session().is_some()
    }

    fn require_session(&self) -> Result<Session> {
        self.session()
            .ok_or_else(|| Error::not_signed_in("sign in before calling this endpoint"))
    }

    pub fn auth_token(&self) -> Result<String> {
        Ok(self.require_session()?.token)
    }

    pub fn site_id(&self) -> Result<String> {
        Ok(self.require_session()?.site_id)
    }

    pub fn user_id(&self) -> Result<String> {
        Ok(self.require_session()?.user_id)
    }

    pub(crate) fn set_session(&self, session: Option<Session>) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session;
    }

    pub(crate) fn clear_auth(&self) {
        self.set_session(None);
    }

    /// Sign in and keep the session for later calls
    pub async fn sign_in(&self, auth: &TableauAuth) -> Result<Session> {
        self.check(Operation::SignIn)?;
        let url = format!("{}/auth/signin", self.baseurl());
        info!("Signing in to {} as {}", self.address, auth.display_name());

        let config = RequestConfig::new().xml(auth.to_request_xml()?);
        let body = self
            .http
            .post(&url, config)
            .await
            .map_err(sign_in_failure)?;
        let session = Session::from_xml(&body)?;
        debug!(site_id = %session.site_id, user_id = %session.user_id, "Signed in");
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    /// Sign out and forget the session; a no-op when not signed in
    pub async fn sign_out(&self) -> Result<()> {
        let Some(session) = self.session() else {
            return Ok(());
        };
        self.check(Operation::SignOut)?;
        let url = format!("{}/auth/signout", self.baseurl());
        let config = RequestConfig::new().auth_token(Some(session.token));
        self.http.post(&url, config).await?;
        self.clear_auth();
        info!("Signed out of {}", self.address);
        Ok(())
    }

    /// Move the session to another site
    pub async fn switch_site(&self, site_content_url: &str) -> Result<Session> {
        let current = self.require_session()?;
        if current.site_content_url == site_content_url {
            warn!("Already signed in to site '{}'", site_content_url);
            return Ok(current);
        }
        self.check(Operation::SwitchSite)?;
        let url = format!("{}/auth/switchSite", self.baseurl());
        let config = RequestConfig::new()
            .auth_token(Some(current.token))
            .xml(switch_site_request_xml(site_content_url)?);
        let body = self.http.post(&url, config).await?;
        let session = Session::from_xml(&body)?;
        info!("Switched to site '{}'", site_content_url);
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    // ========================================================================
    // Version negotiation
    // ========================================================================

    /// Ask the server for its highest REST API version and switch to it
    ///
    /// Servers without `serverInfo` answer 404; their version is derived from
    /// the legacy `/auth?format=xml` product version instead.
    pub async fn use_server_version(&self) -> Result<ApiVersion> {
        let version = match self.server_info().get().await {
            Ok(info) => info.rest_api_version.parse::<ApiVersion>()?,
            Err(Error::ServerResponse { status: 404, .. }) => self.legacy_version().await?,
            Err(Error::EndpointUnavailable { .. }) => {
                warn!("Server info unavailable at {}, keeping it", self.version());
                self.version()
            }
            Err(e) => return Err(e),
        };
        info!("Using REST API version {}", version);
        self.set_version(version);
        Ok(version)
    }

    async fn legacy_version(&self) -> Result<ApiVersion> {
        let url = format!("{}/auth", self.address);
        let config = RequestConfig::new().query("format", "xml");
        let body = self.http.get(&url, config).await?;
        Ok(legacy_version_from_xml(&body))
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Send an authenticated request for `operation`
    ///
    /// Order of checks: version gate, then session, then the request itself.
    pub(crate) async fn send(
        &self,
        operation: Operation,
        method: Method,
        scope: Scope,
        path: &str,
        config: RequestConfig,
    ) -> Result<String> {
        self.check(operation)?;
        let token = self.auth_token()?;
        let url = self.url_for(scope, path)?;
        debug!(operation = %operation, "{:?} {}", method, url);
        self.http
            .request(method, &url, config.auth_token(Some(token)))
            .await
    }

    /// Send a request that needs no session
    pub(crate) async fn send_unauthenticated(
        &self,
        operation: Operation,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<String> {
        self.check(operation)?;
        let url = self.url_for(Scope::Api, path)?;
        debug!(operation = %operation, "{:?} {}", method, url);
        let config = config.auth_token(self.session().map(|s| s.token));
        self.http.request(method, &url, config).await
    }

    pub(crate) fn url_for(&self, scope: Scope, path: &str) -> Result<String> {
        let base = match scope {
            Scope::Api => self.baseurl(),
            Scope::Site => self.site_baseurl()?,
        };
        Ok(format!("{base}{path}"))
    }

    // ========================================================================
    // Endpoints
    // ========================================================================

    pub fn server_info(&self) -> ServerInfo<'_> {
        ServerInfo::new(self)
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    pub fn sites(&self) -> Sites<'_> {
        Sites::new(self)
    }

    pub fn groupsets(&self) -> GroupSets<'_> {
        GroupSets::new(self)
    }

    pub fn data_alerts(&self) -> DataAlerts<'_> {
        DataAlerts::new(self)
    }

    pub fn tags(&self) -> Tags<'_> {
        Tags::new(self)
    }

    /// Per-item tag calls for one kind of content
    pub fn content_tags(&self, content_type: ContentType) -> ContentTags<'_> {
        ContentTags::new(self, content_type)
    }
}

/// Map the legacy auth document's product version through the lookup table
pub(crate) fn legacy_version_from_xml(body: &str) -> ApiVersion {
    let product = xml::parse(body)
        .ok()
        .and_then(|doc| xml::text_of(doc.root_element(), "product_version"));
    let Some(product) = product else {
        warn!("Legacy server did not report a product version");
        return MINIMUM_LEGACY_VERSION;
    };
    let major_minor: String = product.split('.').take(2).collect::<Vec<_>>().join(".");
    PRODUCT_TO_REST_VERSION
        .iter()
        .find(|(p, _)| *p == major_minor)
        .map(|(_, v)| *v)
        .unwrap_or(MINIMUM_LEGACY_VERSION)
}

fn sign_in_failure(err: Error) -> Error {
    match err {
        Error::ServerResponse {
            status: 401,
            summary,
            detail,
            ..
        } => Error::FailedSignIn {
            message: format!("{summary}: {detail}"),
        },
        other => other,
    }
}

#[cfg(test)]
pub(crate) mod testing;
