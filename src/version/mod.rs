//! REST API version handling
//!
//! Every server operation has a minimum REST API version. Before a request is
//! dispatched the endpoint checks the operation against the version negotiated
//! with the server and fails fast with `Error::EndpointUnavailable`.

mod gate;
mod types;

pub use gate::{check, Operation};
pub use types::{ApiVersion, DEFAULT_API_VERSION};
