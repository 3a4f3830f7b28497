//! Sign-in credentials and the session they produce

use crate::error::{Error, Result};
use crate::xml::{self, ts_request, Element};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Secret used to sign in
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credentials {
    /// Username and password
    Password { username: String, password: String },

    /// Personal access token
    PersonalAccessToken {
        token_name: String,
        token_value: String,
    },

    /// JSON Web Token issued by a connected app
    Jwt { jwt: String },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Credentials::PersonalAccessToken { token_name, .. } => f
                .debug_struct("PersonalAccessToken")
                .field("token_name", token_name)
                .field("token_value", &"***")
                .finish(),
            Credentials::Jwt { .. } => f.debug_struct("Jwt").field("jwt", &"***").finish(),
        }
    }
}

/// Credentials plus the site they sign in to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableauAuth {
    pub credentials: Credentials,
    /// Content URL of the site; empty for the default site
    pub site_content_url: String,
    /// Sign in as another user (password auth only)
    pub user_id_to_impersonate: Option<String>,
}

impl TableauAuth {
    pub fn password(
        username: impl Into<String>,
        password: impl Into<String>,
        site: impl Into<String>,
    ) -> Self {
        Self::new(
            Credentials::Password {
                username: username.into(),
                password: password.into(),
            },
            site,
        )
    }

    pub fn personal_access_token(
        token_name: impl Into<String>,
        token_value: impl Into<String>,
        site: impl Into<String>,
    ) -> Self {
        Self::new(
            Credentials::PersonalAccessToken {
                token_name: token_name.into(),
                token_value: token_value.into(),
            },
            site,
        )
    }

    pub fn jwt(jwt: impl Into<String>, site: impl Into<String>) -> Self {
        Self::new(Credentials::Jwt { jwt: jwt.into() }, site)
    }

    pub fn new(credentials: Credentials, site: impl Into<String>) -> Self {
        Self {
            credentials,
            site_content_url: site.into(),
            user_id_to_impersonate: None,
        }
    }

    #[must_use]
    pub fn impersonate(mut self, user_id: impl Into<String>) -> Self {
        self.user_id_to_impersonate = Some(user_id.into());
        self
    }

    /// Sign-in request body
    pub fn to_request_xml(&self) -> Result<String> {
        let mut credentials = match &self.credentials {
            Credentials::Password { username, password } => Element::new("credentials")
                .attr("name", username.as_str())
                .attr("password", password.as_str()),
            Credentials::PersonalAccessToken {
                token_name,
                token_value,
            } => Element::new("credentials")
                .attr("personalAccessTokenName", token_name.as_str())
                .attr("personalAccessTokenSecret", token_value.as_str()),
            Credentials::Jwt { jwt } => Element::new("credentials").attr("jwt", jwt.as_str()),
        };
        credentials = credentials
            .child(Element::new("site").attr("contentUrl", self.site_content_url.as_str()));
        if let Some(ref user_id) = self.user_id_to_impersonate {
            credentials = credentials.child(Element::new("user").attr("id", user_id.as_str()));
        }
        ts_request([credentials])
    }

    /// Name to show in logs, without the secret
    pub fn display_name(&self) -> &str {
        match &self.credentials {
            Credentials::Password { username, .. } => username,
            Credentials::PersonalAccessToken { token_name, .. } => token_name,
            Credentials::Jwt { .. } => "jwt",
        }
    }
}

/// Switch-site request body
pub fn switch_site_request_xml(site_content_url: &str) -> Result<String> {
    ts_request([Element::new("site").attr("contentUrl", site_content_url)])
}

/// An authenticated session
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub site_id: String,
    pub site_content_url: String,
    pub user_id: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"***")
            .field("site_id", &self.site_id)
            .field("site_content_url", &self.site_content_url)
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl Session {
    /// Read `<credentials token=..><site id= contentUrl=/><user id=/></credentials>`
    pub fn from_xml(body: &str) -> Result<Self> {
        let doc = xml::parse(body)?;
        let credentials = xml::find(doc.root_element(), "credentials").ok_or_else(|| {
            Error::FailedSignIn {
                message: "response carries no credentials".to_string(),
            }
        })?;
        let token = xml::attr(credentials, "token").ok_or_else(|| Error::FailedSignIn {
            message: "response carries no session token".to_string(),
        })?;
        Ok(Self {
            token,
            site_id: xml::nested_attr(credentials, "site", "id").unwrap_or_default(),
            site_content_url: xml::nested_attr(credentials, "site", "contentUrl")
                .unwrap_or_default(),
            user_id: xml::nested_attr(credentials, "user", "id").unwrap_or_default(),
        })
    }
}
