//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, ListArgs};
use crate::collator::{NdjsonCollator, ObjectStoreSearch};
use crate::config::AppConfig;
use crate::error::Result;
use crate::gitlab::{GitLabClient, ListOptions};
use crate::http::ReqwestTransport;
use futures::stream::{BoxStream, StreamExt};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Projects { list, archived } => {
                let client = self.gitlab_client(&config, &list.target)?;
                let options = ListOptions {
                    archived: *archived,
                    ..list_options(list)
                };
                let items = client.list_projects(&list.target, &options)?;
                emit("projects", items, list.limit).await
            }
            Commands::Groups { list } => {
                let client = self.gitlab_client(&config, &list.target)?;
                let items = client.list_groups(&list.target, &list_options(list))?;
                emit("groups", items, list.limit).await
            }
            Commands::Users { list, active } => {
                let client = self.gitlab_client(&config, &list.target)?;
                let options = ListOptions {
                    active: *active,
                    ..list_options(list)
                };
                let items = client.list_users(&list.target, &options)?;
                emit("users", items, list.limit).await
            }
            Commands::Collate {
                pattern,
                document_type,
                limit,
            } => {
                let collator =
                    NdjsonCollator::new(document_type, pattern, Arc::new(ObjectStoreSearch::new()));
                let records = collator.collate::<Value>().await?;
                emit(collator.document_type(), records, *limit).await
            }
        }
    }

    /// Load the config file, or defaults when none was given
    fn load_config(&self) -> Result<AppConfig> {
        match &self.cli.config {
            Some(path) => AppConfig::load(path),
            None => Ok(AppConfig::default()),
        }
    }

    /// Build a client for the integration that owns `target`
    fn gitlab_client(&self, config: &AppConfig, target: &str) -> Result<GitLabClient> {
        let transport = Arc::new(ReqwestTransport::with_config(config.http.client_config())?);
        let client =
            GitLabClient::from_integrations(&config.scm_integrations(), target, transport)?;

        Ok(client
            .with_page_size(config.pagination.page_size)
            .with_max_pages(config.pagination.max_pages))
    }
}

fn list_options(list: &ListArgs) -> ListOptions {
    ListOptions {
        search: list.search.clone(),
        ..ListOptions::default()
    }
}

/// Print items as JSON lines, pulling no more than `limit` of them
async fn emit<T: Serialize>(
    kind: &str,
    mut items: BoxStream<'_, Result<T>>,
    limit: Option<usize>,
) -> Result<()> {
    let stdout = std::io::stdout();
    let mut count = 0usize;

    while limit.map_or(true, |limit| count < limit) {
        let Some(item) = items.next().await else {
            break;
        };
        let line = serde_json::to_string(&item?)?;
        writeln!(stdout.lock(), "{line}")?;
        count += 1;
    }

    info!(kind, count, "Finished");
    Ok(())
}
