use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Skill-aware technician assignment for IT-support tickets.
///
/// # Examples
///
/// ```bash
/// # Assign a new ticket
/// ticket-router assign --ticket ticket.json
///
/// # Score a resolved ticket and update the technician's proficiencies
/// ticket-router evaluate --ticket resolved.json --technician 12
/// ```
#[derive(Parser)]
#[command(name = "ticket-router")]
#[command(about = "Skill-aware technician assignment and proficiency feedback for IT-support tickets")]
#[command(version)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: <config dir>/ticket-router/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile a ticket's skills and assign it to a technician
    Assign {
        /// Ticket JSON file, bare or wrapped as {"ticket": {...}}
        #[arg(short, long)]
        ticket: PathBuf,
    },

    /// Compute metrics for a resolved ticket and update proficiencies
    Evaluate {
        /// Resolved ticket JSON file
        #[arg(short, long)]
        ticket: PathBuf,

        /// Technician who resolved the ticket
        #[arg(long)]
        technician: i64,
    },

    /// Split a ticket's skills into catalog and new skills
    Reconcile {
        #[arg(short, long)]
        ticket: PathBuf,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration, environment overrides included
    Show,

    /// Check the configuration file
    Validate,
}
