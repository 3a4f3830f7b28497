//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, ConnectionArgs, SiteCommands, UserCommands};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::models::SiteItem;
use crate::pagination::Pager;
use crate::query::{FilterArg, RequestOptions};
use crate::server::Server;
use serde::Serialize;
use tracing::{debug, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Sign in, run the command, sign out
    ///
    /// Sign-out runs even when the command fails; the command's error wins.
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        let server = config.connect()?;
        server.sign_in(&config.credentials()?).await?;
        if config.use_server_version {
            server.use_server_version().await?;
        }

        let outcome = self.dispatch(&server, &config).await;
        if let Err(e) = server.sign_out().await {
            warn!("Sign out failed: {}", e);
        }
        outcome
    }

    /// File, then `TSC_*` environment, then command-line flags
    fn load_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        config.apply_env()?;
        apply_flags(&mut config, &self.cli.connection);
        config.validate()?;
        debug!(server = %config.server, site = %config.site, "Loaded configuration");
        Ok(config)
    }

    async fn dispatch(&self, server: &Server, config: &ClientConfig) -> Result<()> {
        match &self.cli.command {
            Commands::ServerInfo => output(&server.server_info().get().await?),
            Commands::Users { command } => match command {
                UserCommands::List {
                    filters,
                    sorts,
                    page_size,
                    limit,
                } => {
                    let page_size = (*page_size).or(config.page_size);
                    self.list_users(server, filters, sorts, page_size, *limit)
                        .await
                }
                UserCommands::Workbooks { user_id } => {
                    let users = server.users();
                    let workbooks = users.workbooks(user_id)?;
                    let pager = workbooks.pager_with(page_options(config.page_size)?)?;
                    output(&pager.collect().await?)
                }
            },
            Commands::Sites {
                command: SiteCommands::List,
            } => {
                let sites = server.sites();
                let pager = Pager::<SiteItem>::with_options(&sites, page_options(config.page_size)?)?;
                output(&pager.collect().await?)
            }
        }
    }

    async fn list_users(
        &self,
        server: &Server,
        filters: &[FilterArg],
        sorts: &[String],
        page_size: Option<i64>,
        limit: Option<usize>,
    ) -> Result<()> {
        let users = server.users();
        let mut query = users.filter_args(filters.iter().cloned())?;
        if !sorts.is_empty() {
            let specs: Vec<&str> = sorts.iter().map(String::as_str).collect();
            query = query.order_by(&specs)?;
        }
        if let Some(size) = page_size {
            query = query.page_size(size)?;
        }

        // Pull only as many pages as the limit needs
        let mut pager = query.pager()?;
        let mut found = Vec::new();
        while limit.map_or(true, |n| found.len() < n) {
            match pager.next().await? {
                Some(user) => found.push(user),
                None => break,
            }
        }
        debug!(pages = pager.pages_fetched(), users = found.len(), "Listed users");
        output(&found)
    }
}

fn apply_flags(config: &mut ClientConfig, flags: &ConnectionArgs) {
    let set = |target: &mut Option<String>, value: &Option<String>| {
        if value.is_some() {
            target.clone_from(value);
        }
    };
    if let Some(server) = &flags.server {
        config.server.clone_from(server);
    }
    if let Some(site) = &flags.site {
        config.site.clone_from(site);
    }
    set(&mut config.api_version, &flags.api_version);
    set(&mut config.auth.token_name, &flags.token_name);
    set(&mut config.auth.token_value, &flags.token_value);
    set(&mut config.auth.username, &flags.username);
    set(&mut config.auth.password, &flags.password);
    config.use_server_version |= flags.use_server_version;
}

fn page_options(page_size: Option<i64>) -> Result<RequestOptions> {
    match page_size {
        Some(size) => RequestOptions::new().with_page_size(size),
        None => Ok(RequestOptions::new()),
    }
}

/// Print as pretty JSON
fn output<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
