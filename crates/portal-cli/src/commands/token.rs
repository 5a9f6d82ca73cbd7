//! Invitation token commands.

use clap::{Args, Subcommand};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tabled::Tabled;

use portal_auth::invitation::InvitationCodeGenerator;
use portal_core::config::AppConfig;
use portal_core::error::AppError;
use portal_database::Database;
use portal_entity::invitation::{InvitationStatus, InvitationToken};
use portal_service::{InvitationService, RequestContext};

use crate::output::{self, OutputFormat};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Generate a registration token on behalf of an administrator
    Generate {
        /// Lifespan in days (1, 3, or 7)
        #[arg(short, long, default_value_t = 3)]
        days: i64,
        /// Email of the issuing administrator
        #[arg(short, long)]
        issuer: String,
    },
    /// List every token with its status
    List {
        /// Email of the requesting administrator
        #[arg(short, long)]
        issuer: String,
    },
}

/// Token display row
#[derive(Debug, Serialize, Tabled)]
struct TokenRow {
    token: String,
    status: String,
    created_at: String,
    expires_at: String,
    used_by: String,
}

impl TokenRow {
    fn new(token: &InvitationToken, now: chrono::DateTime<Utc>) -> Self {
        let status = match token.status_at(now) {
            InvitationStatus::Available => "available",
            InvitationStatus::Used => "used",
            InvitationStatus::Expired => "expired",
        };
        Self {
            token: token.token.clone(),
            status: status.to_string(),
            created_at: token.created_at.format("%Y-%m-%d %H:%M").to_string(),
            expires_at: token.expires_at.format("%Y-%m-%d %H:%M").to_string(),
            used_by: token.used_by.clone().unwrap_or_default(),
        }
    }
}

/// Execute token commands
pub async fn execute(
    args: &TokenArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let db = super::open_database(config).await?;
    let result = run(&args.command, &db, format).await;
    db.close().await;
    result
}

async fn run(command: &TokenCommand, db: &Database, format: OutputFormat) -> Result<(), AppError> {
    let service = InvitationService::new(db.clone(), Arc::new(InvitationCodeGenerator::new()));

    match command {
        TokenCommand::Generate { days, issuer } => {
            let ctx = issuer_context(db, issuer).await?;
            let token = service.generate(&ctx, *days).await?;
            output::print_success(&format!("Token valid for {days} day(s)"));
            output::print_item(&TokenRow::new(&token, Utc::now()), format);
        }
        TokenCommand::List { issuer } => {
            let ctx = issuer_context(db, issuer).await?;
            let tokens = service.list(&ctx).await?;
            let now = Utc::now();
            let rows: Vec<TokenRow> = tokens.iter().map(|t| TokenRow::new(t, now)).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}

/// Builds a request context for the named account. Admin checks happen in
/// the service.
async fn issuer_context(db: &Database, email: &str) -> Result<RequestContext, AppError> {
    let staff = db
        .staff()
        .find_by_email(email)
        .await?
        .ok_or_else(|| AppError::not_found(format!("No staff account for '{email}'")))?;
    Ok(RequestContext::from(&staff))
}
