//! Subject catalogue commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use portal_core::config::AppConfig;
use portal_core::error::AppError;
use portal_core::types::{StaffId, SubjectId};
use portal_database::Database;
use portal_entity::subject::{NewSubject, Subject};
use portal_service::DirectoryService;

use crate::output::{self, OutputFormat};

/// Arguments for subject commands
#[derive(Debug, Args)]
pub struct SubjectArgs {
    #[command(subcommand)]
    pub command: SubjectCommand,
}

/// Subject subcommands
#[derive(Debug, Subcommand)]
pub enum SubjectCommand {
    /// List subjects
    List,
    /// Add a subject
    Add {
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Short unique code
        #[arg(short, long)]
        code: String,
        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Link a subject to a staff member
    Assign {
        /// Staff id
        #[arg(long)]
        staff_id: i64,
        /// Subject id
        #[arg(long)]
        subject_id: i64,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct SubjectRow {
    id: i64,
    code: String,
    name: String,
    description: String,
}

impl From<Subject> for SubjectRow {
    fn from(s: Subject) -> Self {
        Self {
            id: s.id.get(),
            code: s.code,
            name: s.name,
            description: s.description.unwrap_or_default(),
        }
    }
}

/// Execute subject commands
pub async fn execute(
    args: &SubjectArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::open_database(config).await?;
    let result = run(&args.command, &db, format).await;
    db.close().await;
    result
}

async fn run(command: &SubjectCommand, db: &Database, format: OutputFormat) -> Result<(), AppError> {
    let directory = DirectoryService::new(db.clone());

    match command {
        SubjectCommand::List => {
            let rows: Vec<SubjectRow> = directory
                .list_subjects()
                .await?
                .into_iter()
                .map(SubjectRow::from)
                .collect();
            output::print_list(&rows, format);
        }
        SubjectCommand::Add {
            name,
            code,
            description,
        } => {
            let subject = directory
                .add_subject(NewSubject {
                    name: name.trim().to_string(),
                    code: code.trim().to_string(),
                    description: description.clone(),
                })
                .await?;
            output::print_success("Subject added");
            output::print_item(&SubjectRow::from(subject), format);
        }
        SubjectCommand::Assign {
            staff_id,
            subject_id,
        } => {
            directory
                .assign_subject(StaffId(*staff_id), SubjectId(*subject_id))
                .await?;
            output::print_success(&format!(
                "Subject {subject_id} assigned to staff {staff_id}"
            ));
        }
    }

    Ok(())
}
