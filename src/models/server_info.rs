//! Server info response

use super::parse_one;
use crate::error::Result;
use crate::xml;
use serde::Serialize;
use std::fmt;

/// Product and REST API versions reported by `serverInfo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfoItem {
    pub product_version: String,
    pub build_number: Option<String>,
    pub rest_api_version: String,
}

impl ServerInfoItem {
    /// Read `<serverInfo><productVersion build=..>..</productVersion><restApiVersion>..`
    ///
    /// A body that is not XML yields an item with every version set to
    /// `Unknown`.
    pub fn from_xml(body: &str) -> Result<Self> {
        if !xml::is_xml(body) {
            tracing::warn!("Unexpected response for server info: {}", body);
            return Ok(Self::unknown());
        }
        parse_one(body, "serverInfo", |node| Self {
            product_version: xml::text_of(node, "productVersion")
                .unwrap_or_else(|| "Unknown".to_string()),
            build_number: xml::find(node, "productVersion").and_then(|n| xml::attr(n, "build")),
            rest_api_version: xml::text_of(node, "restApiVersion")
                .unwrap_or_else(|| "Unknown".to_string()),
        })
    }

    fn unknown() -> Self {
        Self {
            product_version: "Unknown".to_string(),
            build_number: Some("Unknown".to_string()),
            rest_api_version: "Unknown".to_string(),
        }
    }
}

impl fmt::Display for ServerInfoItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ServerInfoItem: [product version: {}, build no.: {}, REST API version: {}]",
            self.product_version,
            self.build_number.as_deref().unwrap_or("None"),
            self.rest_api_version
        )
    }
}
