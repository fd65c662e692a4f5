use anyhow::{bail, Result};
use async_trait::async_trait;
use std::path::PathBuf;

use super::utils::{print_json, read_ticket};
use super::{Command, Runtime};
use crate::core::{with_retry, RouterResult};
use crate::service::{EvaluationOutcome, EvaluationService};

pub struct EvaluateCommand {
    runtime: Runtime,
    ticket: PathBuf,
    technician_id: i64,
}

impl EvaluateCommand {
    pub fn new(runtime: Runtime, ticket: PathBuf, technician_id: i64) -> Self {
        Self {
            runtime,
            ticket,
            technician_id,
        }
    }

    async fn run(&self) -> RouterResult<EvaluationOutcome> {
        let ticket = read_ticket(&self.ticket).await?;
        let service = EvaluationService::new(
            self.runtime.catalog.clone(),
            self.runtime.inference.clone(),
            &self.runtime.config,
        );
        with_retry(&self.runtime.retry, "evaluate", || {
            service.evaluate(&ticket, self.technician_id)
        })
        .await
    }
}

#[async_trait]
impl Command for EvaluateCommand {
    async fn execute(&self) -> Result<()> {
        match self.run().await {
            Ok(outcome) => print_json(&outcome),
            Err(err) => {
                print_json(&EvaluationOutcome::failed(&err))?;
                bail!("evaluation failed: {} ({})", err, err.kind())
            }
        }
    }
}
