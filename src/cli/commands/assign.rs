use anyhow::{bail, Result};
use async_trait::async_trait;
use std::path::PathBuf;

use super::utils::{print_json, read_ticket};
use super::{Command, Runtime};
use crate::core::{with_retry, RouterResult};
use crate::service::{AssignmentOutcome, AssignmentService};

pub struct AssignCommand {
    runtime: Runtime,
    ticket: PathBuf,
}

impl AssignCommand {
    pub fn new(runtime: Runtime, ticket: PathBuf) -> Self {
        Self { runtime, ticket }
    }

    async fn run(&self) -> RouterResult<AssignmentOutcome> {
        let ticket = read_ticket(&self.ticket).await?;
        let service = AssignmentService::new(
            self.runtime.catalog.clone(),
            self.runtime.inference.clone(),
            &self.runtime.config,
        );
        with_retry(&self.runtime.retry, "assign", || service.assign(&ticket)).await
    }
}

#[async_trait]
impl Command for AssignCommand {
    async fn execute(&self) -> Result<()> {
        match self.run().await {
            Ok(outcome) => print_json(&outcome),
            Err(err) => {
                print_json(&AssignmentOutcome::failed(&err))?;
                bail!("assignment failed: {} ({})", err, err.kind())
            }
        }
    }
}
