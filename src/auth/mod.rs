//! Authentication module
//!
//! Supports: username/password, personal access tokens, connected-app JWTs
//!
//! Signing in exchanges `TableauAuth` for a `Session` whose token is sent in
//! the `X-Tableau-Auth` header on every later call.

mod types;

pub use types::{switch_site_request_xml, Credentials, Session, TableauAuth};

#[cfg(test)]
mod tests;
