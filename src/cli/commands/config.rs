use anyhow::{bail, Result};
use async_trait::async_trait;
use std::path::PathBuf;

use crate::cli::args::ConfigAction;
use crate::cli::commands::Command;
use crate::core::config::{self, default_config_path};
use crate::core::RouterConfig;

pub struct ConfigCommand {
    action: ConfigAction,
    path: Option<PathBuf>,
}

impl ConfigCommand {
    pub fn new(action: ConfigAction, path: Option<PathBuf>) -> Self {
        Self { action, path }
    }

    fn target(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_config_path)
    }
}

#[async_trait]
impl Command for ConfigCommand {
    async fn execute(&self) -> Result<()> {
        let config_path = self.target();

        match &self.action {
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    bail!(
                        "{} already exists; pass --force to overwrite",
                        config_path.display()
                    );
                }
                RouterConfig::default().save(&config_path).await?;
                println!("Configuration initialized at {}", config_path.display());
            }

            ConfigAction::Show => {
                let mut effective = config::resolve(self.path.as_deref()).await?;
                if effective.inference.api_key.is_some() {
                    effective.inference.api_key = Some("********".to_string());
                }
                println!("{}", effective.to_toml()?);
            }

            ConfigAction::Validate => {
                config::resolve(self.path.as_deref()).await?;
                println!("Configuration at {} is valid", config_path.display());
            }
        }

        Ok(())
    }
}
