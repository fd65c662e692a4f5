use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use crate::catalog::{CatalogClient, CatalogStore};
use crate::core::{RetryPolicy, RouterConfig};
use crate::inference::{self, InferenceClient};

pub mod assign;
pub mod config;
pub mod evaluate;
pub mod reconcile;

/// Trait for CLI command implementations
#[async_trait]
pub trait Command {
    /// Execute the command with the given arguments
    async fn execute(&self) -> Result<()>;
}

/// Collaborators shared by the ticket commands, built once from configuration.
pub struct Runtime {
    pub config: RouterConfig,
    pub catalog: Arc<dyn CatalogStore>,
    pub inference: Arc<dyn InferenceClient>,
    pub retry: RetryPolicy,
}

impl Runtime {
    pub fn from_config(config: RouterConfig) -> Result<Self> {
        let catalog = CatalogClient::new(&config.backend).context("building backend client")?;
        let inference =
            inference::build_client(&config.inference).context("building inference client")?;
        Ok(Self {
            retry: RetryPolicy::from(&config.retry),
            catalog: Arc::new(catalog),
            inference,
            config,
        })
    }
}

/// Common utilities for command implementations
pub mod utils {
    use anyhow::Result;
    use serde::{Deserialize, Serialize};
    use std::path::Path;
    use tokio::fs;

    use crate::core::{RouterError, RouterResult, Ticket};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TicketPayload {
        Wrapped { ticket: Ticket },
        Bare(Ticket),
    }

    /// Read a ticket from JSON, accepting `{"ticket": {...}}` or the ticket itself.
    pub fn parse_ticket(content: &str) -> RouterResult<Ticket> {
        let payload: TicketPayload = serde_json::from_str(content)
            .map_err(|e| RouterError::validation("ticket", format!("not a valid ticket: {e}")))?;
        Ok(match payload {
            TicketPayload::Wrapped { ticket } => ticket,
            TicketPayload::Bare(ticket) => ticket,
        })
    }

    pub async fn read_ticket(path: &Path) -> RouterResult<Ticket> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| RouterError::io(format!("reading ticket file {}", path.display()), e))?;
        parse_ticket(&content)
    }

    pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
