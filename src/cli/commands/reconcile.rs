use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;

use super::utils::{print_json, read_ticket};
use super::{Command, Runtime};
use crate::core::{with_retry, RouterError, RouterResult, SkillMatchResult};
use crate::reconcile::SkillReconciler;

/// Printed in place of the reconciliation when it cannot be produced.
#[derive(Debug, Serialize)]
struct ReconcileFailure {
    success: bool,
    error_kind: &'static str,
    error_message: String,
}

impl From<&RouterError> for ReconcileFailure {
    fn from(err: &RouterError) -> Self {
        Self {
            success: false,
            error_kind: err.kind(),
            error_message: err.to_string(),
        }
    }
}

pub struct ReconcileCommand {
    runtime: Runtime,
    ticket: PathBuf,
}

impl ReconcileCommand {
    pub fn new(runtime: Runtime, ticket: PathBuf) -> Self {
        Self { runtime, ticket }
    }

    async fn run(&self) -> RouterResult<SkillMatchResult> {
        let ticket = read_ticket(&self.ticket).await?;
        let policy = &self.runtime.retry;

        let catalog =
            with_retry(policy, "fetch skills", || self.runtime.catalog.fetch_skills()).await?;

        let reconciler = SkillReconciler::new(self.runtime.inference.clone());
        with_retry(policy, "reconcile", || reconciler.reconcile(&ticket, &catalog)).await
    }
}

#[async_trait]
impl Command for ReconcileCommand {
    async fn execute(&self) -> Result<()> {
        match self.run().await {
            Ok(result) => print_json(&result),
            Err(err) => {
                print_json(&ReconcileFailure::from(&err))?;
                bail!("reconciliation failed: {} ({})", err, err.kind())
            }
        }
    }
}
