//! Common types used throughout the client
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

/// Ordered query parameters, as sent on the wire
pub type QueryParams = Vec<(String, String)>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Backoff strategy for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Site Admin Mode
// ============================================================================

/// Who may administer a site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminMode {
    ContentAndUsers,
    ContentOnly,
}

impl AdminMode {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminMode::ContentAndUsers => "ContentAndUsers",
            AdminMode::ContentOnly => "ContentOnly",
        }
    }

    /// Parse the wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ContentAndUsers" => Some(AdminMode::ContentAndUsers),
            "ContentOnly" => Some(AdminMode::ContentOnly),
            _ => None,
        }
    }
}

// ============================================================================
// Content Type
// ============================================================================

/// Kinds of content that can carry tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Workbook,
    View,
    Datasource,
    Flow,
    Table,
    Database,
    Column,
}

impl ContentType {
    /// Name used in request bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Workbook => "workbook",
            ContentType::View => "view",
            ContentType::Datasource => "datasource",
            ContentType::Flow => "flow",
            ContentType::Table => "table",
            ContentType::Database => "database",
            ContentType::Column => "column",
        }
    }

    /// Collection segment in site-scoped URLs
    pub fn url_segment(&self) -> &'static str {
        match self {
            ContentType::Workbook => "workbooks",
            ContentType::View => "views",
            ContentType::Datasource => "datasources",
            ContentType::Flow => "flows",
            ContentType::Table => "tables",
            ContentType::Database => "databases",
            ContentType::Column => "columns",
        }
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
