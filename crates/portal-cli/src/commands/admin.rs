//! Administrator bootstrap commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use portal_auth::password::PasswordHasher;
use portal_core::config::AppConfig;
use portal_core::error::AppError;
use portal_entity::staff::{AccessLevel, NewStaff};

use crate::output::{self, OutputFormat};

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create an administrator account (prompts for anything omitted)
    Create {
        /// Login email
        #[arg(short, long)]
        email: Option<String>,
        /// Given name
        #[arg(long)]
        firstname: Option<String>,
        /// Family name
        #[arg(long)]
        surname: Option<String>,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct CreatedRow {
    id: i64,
    email: String,
    name: String,
    access_level: String,
}

fn prompt(label: &str) -> Result<String, AppError> {
    dialoguer::Input::<String>::new()
        .with_prompt(label)
        .interact_text()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

/// Execute admin commands
pub async fn execute(
    args: &AdminArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        AdminCommand::Create {
            email,
            firstname,
            surname,
        } => {
            let email = match email {
                Some(e) => e.clone(),
                None => prompt("Admin email")?,
            };
            let firstname = match firstname {
                Some(f) => f.clone(),
                None => prompt("First name")?,
            };
            let surname = match surname {
                Some(s) => s.clone(),
                None => prompt("Surname")?,
            };

            let password = dialoguer::Password::new()
                .with_prompt("Admin password")
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()
                .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

            if [&email, &firstname, &surname, &password]
                .iter()
                .any(|f| f.trim().is_empty())
            {
                return Err(AppError::validation("All fields are required"));
            }

            let password_hash = PasswordHasher::new().hash_password(&password)?;

            let db = super::open_database(config).await?;
            let staff = db
                .staff()
                .create(&NewStaff {
                    email: email.trim().to_string(),
                    firstname: firstname.trim().to_string(),
                    surname: surname.trim().to_string(),
                    password_hash,
                    access_level: AccessLevel::Admin,
                })
                .await;
            db.close().await;
            let staff = staff?;

            output::print_success(&format!("Admin account created (id: {})", staff.id));
            output::print_item(
                &CreatedRow {
                    id: staff.id.get(),
                    name: staff.full_name(),
                    email: staff.email,
                    access_level: staff.access_level.as_str().to_string(),
                },
                format,
            );
        }
    }

    Ok(())
}
