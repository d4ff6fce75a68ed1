// src/config.rs
use crate::constants::{DEFAULT_FETCH_CONCURRENCY, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::error::AppError;
use crate::types::{ApiKey, DatabaseId};
use clap::{Parser, Subcommand};
use std::time::Duration;

/// Environment variable holding the integration token.
pub const TOKEN_ENV_VAR: &str = "NOTION_TOKEN";
/// Environment variable holding the blog database id.
pub const DATABASE_ENV_VAR: &str = "NOTION_DATABASE_ID";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: BlogCommand,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false, global = true)]
    pub verbose: bool,

    /// Blog database URL or ID (overrides NOTION_DATABASE_ID)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Number of post bodies fetched at once
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum BlogCommand {
    /// List published posts, newest first
    List {
        /// Fetch every post body to estimate its reading time
        #[arg(long, default_value_t = false)]
        reading_time: bool,
    },
    /// Render one post by its slug
    Show {
        /// The post's slug
        slug: String,
    },
}

/// Resolved configuration, validated and ready to build the client.
#[derive(Debug, Clone)]
pub struct BlogConfig {
    pub api_key: ApiKey,
    pub database_id: DatabaseId,
    pub request_timeout: Duration,
    pub concurrency: usize,
}

impl BlogConfig {
    /// Resolves configuration from CLI input and the process environment.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Resolves configuration with an explicit variable lookup.
    pub fn resolve_with(
        cli: &CommandLineInput,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let api_key_str = lookup(TOKEN_ENV_VAR).ok_or_else(|| {
            AppError::MissingConfiguration(format!(
                "{} environment variable not set",
                TOKEN_ENV_VAR
            ))
        })?;
        let api_key = ApiKey::new(api_key_str)?;

        let database_input = cli
            .database
            .clone()
            .or_else(|| lookup(DATABASE_ENV_VAR))
            .ok_or_else(|| {
                AppError::MissingConfiguration(format!(
                    "no database given: pass --database or set {}",
                    DATABASE_ENV_VAR
                ))
            })?;
        let database_id = DatabaseId::parse(&database_input)?;

        let timeout_secs = cli
            .timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
            .max(1);

        Ok(BlogConfig {
            api_key,
            database_id,
            request_timeout: Duration::from_secs(timeout_secs),
            concurrency: cli.concurrency.unwrap_or(DEFAULT_FETCH_CONCURRENCY).max(1),
        })
    }
}
