//! CLI commands and argument parsing

use crate::query::FilterArg;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Tableau Server REST API client
#[derive(Parser, Debug)]
#[command(name = "tsc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings that override the config file and `TSC_*` variables
#[derive(Args, Debug, Default)]
pub struct ConnectionArgs {
    /// Server address, e.g. https://tableau.example.com
    #[arg(short, long, global = true)]
    pub server: Option<String>,

    /// Site content URL; empty for the default site
    #[arg(long, global = true)]
    pub site: Option<String>,

    /// Personal access token name
    #[arg(long, global = true)]
    pub token_name: Option<String>,

    /// Personal access token secret
    #[arg(long, global = true)]
    pub token_value: Option<String>,

    #[arg(short, long, global = true)]
    pub username: Option<String>,

    #[arg(short, long, global = true)]
    pub password: Option<String>,

    /// Pin the REST API version, e.g. 3.19
    #[arg(long, global = true)]
    pub api_version: Option<String>,

    /// Switch to the server's highest REST API version after connecting
    #[arg(long, global = true)]
    pub use_server_version: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show product and REST API versions
    ServerInfo,

    /// Work with users on the site
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Work with sites
    Sites {
        #[command(subcommand)]
        command: SiteCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users, optionally filtered and sorted
    List {
        /// Filter as field[__op]=value, e.g. site_role__in=Viewer,Creator
        #[arg(long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<FilterArg>,

        /// Sort field, `-` prefix for descending
        #[arg(long = "sort", value_name = "FIELD", allow_hyphen_values = true)]
        sorts: Vec<String>,

        /// Items per request (1-1000)
        #[arg(long)]
        page_size: Option<i64>,

        /// Stop after this many users
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List the workbooks a user owns
    Workbooks {
        /// User ID
        user_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SiteCommands {
    /// List sites on the server
    List,
}
