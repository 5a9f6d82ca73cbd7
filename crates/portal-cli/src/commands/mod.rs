//! CLI command definitions and dispatch.

pub mod admin;
pub mod migrate;
pub mod staff;
pub mod subject;
pub mod token;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use portal_core::config::AppConfig;
use portal_core::error::AppError;
use portal_database::Database;

/// Staff portal administration
#[derive(Debug, Parser)]
#[command(name = "portal-cli", version, about, long_about = None)]
pub struct Cli {
    /// Explicit configuration file (overrides --env layering)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Environment name used to pick `config/{env}.toml`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply database migrations
    Migrate,
    /// Bootstrap administrator accounts
    Admin(admin::AdminArgs),
    /// Invitation token management
    Token(token::TokenArgs),
    /// Staff directory
    Staff(staff::StaffArgs),
    /// Subject catalogue
    Subject(subject::SubjectArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.load_config()?;

        match &self.command {
            Commands::Migrate => migrate::execute(&config).await,
            Commands::Admin(args) => admin::execute(args, &config, self.format).await,
            Commands::Token(args) => token::execute(args, &config, self.format).await,
            Commands::Staff(args) => staff::execute(args, &config, self.format).await,
            Commands::Subject(args) => subject::execute(args, &config, self.format).await,
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        match &self.config {
            Some(path) => AppConfig::load_file(path),
            None => AppConfig::load(&self.env),
        }
    }
}

/// Helper: open the configured store without running migrations
pub async fn open_database(config: &AppConfig) -> Result<Database, AppError> {
    let mut db_config = config.database.clone();
    db_config.run_migrations = false;
    Database::connect(&db_config).await
}
