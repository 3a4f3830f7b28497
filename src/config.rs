//! Client configuration
//!
//! Settings are read from a YAML file and then overridden from `TSC_*`
//! environment variables.
//!
//! ```yaml
//! server: https://tableau.example.com
//! site: sales
//! use_server_version: true
//! auth:
//!   token_name: ci
//!   token_value: "..."
//! http:
//!   timeout_seconds: 60
//!   max_retries: 2
//! page_size: 200
//! ```

use crate::auth::TableauAuth;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::query::validate_page_size;
use crate::server::Server;
use crate::types::{BackoffType, OptionStringExt};
use crate::version::ApiVersion;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Server address, e.g. `https://tableau.example.com`
    #[serde(default)]
    pub server: String,

    /// Site content URL; empty for the default site
    #[serde(default)]
    pub site: String,

    /// Pin a REST API version instead of the default
    #[serde(default)]
    pub api_version: Option<String>,

    /// Ask the server for its highest version after connecting
    #[serde(default)]
    pub use_server_version: bool,

    /// Sign-in credentials
    #[serde(default)]
    pub auth: AuthSection,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Page size for list calls; server default when unset
    #[serde(default)]
    pub page_size: Option<i64>,
}

// ============================================================================
// Auth
// ============================================================================

/// Credentials as written in the config file
///
/// A token pair wins over a username/password pair, which wins over a JWT.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthSection {
    #[serde(default)]
    pub token_name: Option<String>,
    #[serde(default)]
    pub token_value: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub jwt: Option<String>,
}

impl std::fmt::Debug for AuthSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "***");
        f.debug_struct("AuthSection")
            .field("token_name", &self.token_name)
            .field("token_value", &redact(&self.token_value))
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("jwt", &redact(&self.jwt))
            .finish()
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            user_agent: None,
            accept_invalid_certs: false,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

/// Backoff configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60000
}

// ============================================================================
// Loading
// ============================================================================

impl ClientConfig {
    /// Parse YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("cannot read config file {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&contents)
    }

    /// Apply `TSC_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `TSC_*` overrides from any lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = lookup("TSC_SERVER") {
            self.server = v;
        }
        if let Some(v) = lookup("TSC_SITE") {
            self.site = v;
        }
        if let Some(v) = lookup("TSC_API_VERSION") {
            self.api_version = Some(v);
        }
        if let Some(v) = lookup("TSC_TOKEN_NAME") {
            self.auth.token_name = Some(v);
        }
        if let Some(v) = lookup("TSC_TOKEN_VALUE") {
            self.auth.token_value = Some(v);
        }
        if let Some(v) = lookup("TSC_USERNAME") {
            self.auth.username = Some(v);
        }
        if let Some(v) = lookup("TSC_PASSWORD") {
            self.auth.password = Some(v);
        }
        if let Some(v) = lookup("TSC_PAGE_SIZE") {
            let size = v
                .parse::<i64>()
                .map_err(|_| Error::config(format!("TSC_PAGE_SIZE must be a number, got '{v}'")))?;
            self.page_size = Some(size);
        }
        Ok(())
    }

    /// Check the settings that cannot be defaulted
    pub fn validate(&self) -> Result<()> {
        if self.server.trim().is_empty() {
            return Err(Error::config("server address is required"));
        }
        if let Some(size) = self.page_size {
            validate_page_size(size)?;
        }
        self.api_version()?;
        Ok(())
    }

    /// Pinned API version, if any
    pub fn api_version(&self) -> Result<Option<ApiVersion>> {
        self.api_version
            .as_deref()
            .map(str::parse::<ApiVersion>)
            .transpose()
    }

    /// Credentials to sign in with
    pub fn credentials(&self) -> Result<TableauAuth> {
        // Empty values, e.g. `TSC_PASSWORD=`, count as unset
        let value = |v: &Option<String>| v.clone().none_if_empty();
        let auth = &self.auth;
        if let (Some(name), Some(secret)) = (value(&auth.token_name), value(&auth.token_value)) {
            return Ok(TableauAuth::personal_access_token(
                name,
                secret,
                self.site.as_str(),
            ));
        }
        if let (Some(user), Some(password)) = (value(&auth.username), value(&auth.password)) {
            return Ok(TableauAuth::password(user, password, self.site.as_str()));
        }
        if let Some(jwt) = value(&auth.jwt) {
            return Ok(TableauAuth::jwt(jwt, self.site.as_str()));
        }
        Err(Error::config(
            "no credentials: set token_name/token_value, username/password or jwt",
        ))
    }

    /// HTTP client settings as the client expects them
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries)
            .backoff(
                self.http.retry_backoff.backoff_type,
                Duration::from_millis(self.http.retry_backoff.initial_ms),
                Duration::from_millis(self.http.retry_backoff.max_ms),
            )
            .accept_invalid_certs(self.http.accept_invalid_certs);
        if let Some(ref agent) = self.http.user_agent {
            builder = builder.user_agent(agent.as_str());
        }
        builder.build()
    }

    /// Build a server handle, pinned to `api_version` when set
    pub fn connect(&self) -> Result<Server> {
        self.validate()?;
        let http = HttpClient::with_config(self.http_client_config())?;
        let server = Server::with_http_client(&self.server, http)?;
        if let Some(version) = self.api_version()? {
            server.set_version(version);
        }
        Ok(server)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Credentials;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_parse_minimal_config() {
        let config = ClientConfig::from_yaml("server: https://tableau.example.com\n").unwrap();
        assert_eq!(config.server, "https://tableau.example.com");
        assert_eq!(config.site, "");
        assert!(!config.use_server_version);
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.http.retry_backoff.backoff_type, BackoffType::Exponential);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config_from_file() {
        let yaml = r#"
server: https://tableau.example.com
site: sales
api_version: "3.19"
use_server_version: true
auth:
  token_name: ci
  token_value: secret
http:
  timeout_seconds: 60
  max_retries: 1
  retry_backoff:
    type: linear
    initial_ms: 50
page_size: 250
"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.site, "sales");
        assert_eq!(config.api_version().unwrap(), Some(ApiVersion::new(3, 19)));
        assert_eq!(config.page_size, Some(250));

        let http = config.http_client_config();
        assert_eq!(http.timeout, Duration::from_secs(60));
        assert_eq!(http.max_retries, 1);
        assert_eq!(http.backoff_type, BackoffType::Linear);
        assert_eq!(http.initial_backoff, Duration::from_millis(50));

        let auth = config.credentials().unwrap();
        assert_eq!(auth.site_content_url, "sales");
        assert!(matches!(
            auth.credentials,
            Credentials::PersonalAccessToken { .. }
        ));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::from_file(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("TSC_SERVER", "https://other.example.com"),
            ("TSC_SITE", "marketing"),
            ("TSC_USERNAME", "admin"),
            ("TSC_PASSWORD", "pw"),
            ("TSC_PAGE_SIZE", "10"),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig::from_yaml("server: https://tableau.example.com\n").unwrap();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.server, "https://other.example.com");
        assert_eq!(config.site, "marketing");
        assert_eq!(config.page_size, Some(10));
        let auth = config.credentials().unwrap();
        assert_eq!(auth.display_name(), "admin");
    }

    #[test]
    fn test_bad_page_size_override() {
        let mut config = ClientConfig::default();
        let err = config
            .apply_overrides(|key| (key == "TSC_PAGE_SIZE").then(|| "lots".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            ClientConfig::default().validate(),
            Err(Error::Config { .. })
        ));

        let config = ClientConfig {
            server: "https://tableau.example.com".into(),
            page_size: Some(1001),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidPageSize { page_size: 1001 })
        ));

        let config = ClientConfig {
            server: "https://tableau.example.com".into(),
            api_version: Some("three".into()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidVersion { .. })
        ));
    }

    #[test]
    fn test_no_credentials() {
        let config = ClientConfig::default();
        assert!(matches!(config.credentials(), Err(Error::Config { .. })));

        // An empty token secret falls through to the password pair
        let mut config = ClientConfig::default();
        config.auth.token_name = Some("ci".into());
        config.auth.token_value = Some(String::new());
        config.auth.username = Some("admin".into());
        config.auth.password = Some("pw".into());
        assert_eq!(config.credentials().unwrap().display_name(), "admin");
    }

    #[test]
    fn test_connect_pins_version() {
        let config = ClientConfig {
            server: "https://tableau.example.com".into(),
            api_version: Some("3.5".into()),
            ..Default::default()
        };
        let server = config.connect().unwrap();
        assert_eq!(server.version(), ApiVersion::new(3, 5));
        assert!(!server.is_signed_in());
    }
}
