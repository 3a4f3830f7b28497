//! CLI module
//!
//! Command-line interface over the client.
//!
//! # Commands
//!
//! - `server-info` - Product and REST API versions
//! - `users list` - Users, with `--filter`, `--sort`, `--page-size`, `--limit`
//! - `users workbooks <id>` - Workbooks a user owns
//! - `sites list` - Sites on the server

mod commands;
mod runner;

pub use commands::{Cli, Commands, ConnectionArgs, SiteCommands, UserCommands};
pub use runner::Runner;
