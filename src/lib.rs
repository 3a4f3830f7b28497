//! # Tableau Server Client
//!
//! An async client for the Tableau Server and Tableau Cloud REST API.
//!
//! ## Features
//!
//! - **Lazy Pagination**: `Pager` walks a collection page by page, on demand
//! - **Query DSL**: Django-style `field__op=value` filters checked per resource
//! - **Version Gating**: Calls newer than the negotiated REST version fail locally
//! - **Sessions**: Password, personal access token or JWT sign-in
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tableau_server_client::{Server, TableauAuth, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let server = Server::new("https://tableau.example.com")?;
//!     server
//!         .sign_in(&TableauAuth::personal_access_token("ci", "secret", "sales"))
//!         .await?;
//!     server.use_server_version().await?;
//!
//!     let users = server.users();
//!     let viewers = users
//!         .filter("site_role", "Viewer")?
//!         .order_by(&["name"])?
//!         .collect()
//!         .await?;
//!
//!     server.sign_out().await
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Server                              │
//! │  version gate → session → URL (api | site scope) → HttpClient│
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────┬──────────┬───────┴──────┬────────────┬───────────┐
//! │  Users   │  Sites   │  GroupSets   │ DataAlerts │   Tags    │
//! └──────────┴──────────┴──────────────┴────────────┴───────────┘
//!                               │
//! ┌─────────────────┬───────────┴──────────┬────────────────────┐
//! │ QuerySet        │ Pager                │ Models (XML)       │
//! │ filter/order_by │ PageFetch → items    │ roxmltree/quick-xml│
//! └─────────────────┴──────────────────────┴────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Credentials and sessions
pub mod auth;

/// HTTP client with retry and backoff
pub mod http;

/// REST API versions and per-operation gating
pub mod version;

/// XML reading and request-body writing
pub mod xml;

/// Resource models parsed from responses
pub mod models;

/// Lazy pagination
pub mod pagination;

/// Request options, filters and `QuerySet`
pub mod query;

/// Server handle, sign-in and dispatch
pub mod server;

/// REST endpoints
pub mod endpoint;

/// Per-item outcomes for bulk calls
pub mod bulk;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::{Credentials, Session, TableauAuth};
pub use bulk::{BulkOutcome, BulkSummary};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use pagination::{Page, PageFetch, Pager, PaginationItem};
pub use query::{Filter, FilterArg, Operator, QuerySet, RequestOptions, Sort};
pub use server::Server;
pub use types::*;
pub use version::{ApiVersion, Operation};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
