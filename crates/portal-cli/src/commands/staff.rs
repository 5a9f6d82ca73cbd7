//! Staff directory commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use portal_core::config::AppConfig;
use portal_core::error::AppError;
use portal_service::DirectoryService;

use crate::output::{self, OutputFormat};

/// Arguments for staff commands
#[derive(Debug, Args)]
pub struct StaffArgs {
    #[command(subcommand)]
    pub command: StaffCommand,
}

/// Staff subcommands
#[derive(Debug, Subcommand)]
pub enum StaffCommand {
    /// List every staff account
    List,
}

#[derive(Debug, Serialize, Tabled)]
struct StaffRow {
    id: i64,
    firstname: String,
    surname: String,
    email: String,
    access_level: String,
}

/// Execute staff commands
pub async fn execute(
    args: &StaffArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::open_database(config).await?;
    let directory = DirectoryService::new(db.clone());

    let result = match &args.command {
        StaffCommand::List => directory.list_staff().await.map(|staff| {
            let rows: Vec<StaffRow> = staff
                .into_iter()
                .map(|s| StaffRow {
                    id: s.id.get(),
                    firstname: s.firstname,
                    surname: s.surname,
                    email: s.email,
                    access_level: s.access_level.as_str().to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }),
    };

    db.close().await;
    result
}
