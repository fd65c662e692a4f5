pub mod args;
pub mod commands;

pub use args::{Cli, Commands, ConfigAction};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::core::config;
use commands::assign::AssignCommand;
use commands::config::ConfigCommand;
use commands::evaluate::EvaluateCommand;
use commands::reconcile::ReconcileCommand;
use commands::{Command, Runtime};

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose when set
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ticket_router={log_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let command: Box<dyn Command + Send + Sync> = match cli.command {
        Commands::Config { action } => Box::new(ConfigCommand::new(action, cli.config)),
        Commands::Assign { ticket } => Box::new(AssignCommand::new(runtime(&cli.config).await?, ticket)),
        Commands::Evaluate { ticket, technician } => Box::new(EvaluateCommand::new(
            runtime(&cli.config).await?,
            ticket,
            technician,
        )),
        Commands::Reconcile { ticket } => {
            Box::new(ReconcileCommand::new(runtime(&cli.config).await?, ticket))
        }
    };

    command.execute().await
}

async fn runtime(path: &Option<std::path::PathBuf>) -> Result<Runtime> {
    let config = config::resolve(path.as_deref()).await?;
    Runtime::from_config(config)
}
