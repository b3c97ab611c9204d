//! CLI administration tool for shortlink.
//!
//! Issues and inspects short links directly against the PostgreSQL store,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Resolve or allocate the short URL for a target (prompts when omitted)
//! cargo run --bin admin -- link shorten https://example.com/a
//!
//! # Look up the existing code for a target without allocating
//! cargo run --bin admin -- link resolve https://example.com/a
//!
//! # Show the target behind a code
//! cargo run --bin admin -- link show aB3xY9
//!
//! # Count issued links
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `shortlink::config`); the postgres store backend
//! is required.

use shortlink::application::services::{LinkService, Resolver};
use shortlink::config::{self, StoreBackend};
use shortlink::infrastructure::persistence::PgShortLinkRepository;
use shortlink::server::connect_pg;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue and inspect short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Return the short URL for a target, allocating a code if needed
    Shorten {
        /// Target URL (prompted for when omitted)
        url: Option<String>,
    },

    /// Look up the code already issued for a target
    Resolve {
        /// Target URL (exact match)
        url: String,
    },

    /// Show the target a short code points to
    Show {
        /// Short code
        code: String,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    if config.store_backend != StoreBackend::Postgres {
        bail!("admin requires STORE_BACKEND=postgres");
    }

    let pool = connect_pg(&config).await?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, pool, &config.base_url).await?,
        Commands::Stats => handle_stats(pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_link_action(action: LinkAction, pool: PgPool, base_url: &str) -> Result<()> {
    let repo = Arc::new(PgShortLinkRepository::new(Arc::new(pool)));

    match action {
        LinkAction::Shorten { url } => {
            let url = match url {
                Some(u) => u,
                None => Input::new().with_prompt("Target URL").interact_text()?,
            };

            let service = LinkService::new(repo, base_url);
            let link = service.get_or_create_short_link(&url).await?;

            println!("{}", "Short link ready".green().bold());
            println!("  Code:      {}", link.code.bright_yellow().bold());
            println!("  Target:    {}", link.target_url.cyan());
            println!("  Short URL: {}", service.short_url(&link.code).bright_white());
        }
        LinkAction::Resolve { url } => {
            let resolver = Resolver::new(repo);

            match resolver.resolve(&url).await? {
                Some(link) => {
                    println!("  Code:    {}", link.code.bright_yellow().bold());
                    println!(
                        "  Created: {}",
                        link.created_at
                            .format("%Y-%m-%d %H:%M")
                            .to_string()
                            .bright_black()
                    );
                }
                None => println!("{}", "  No short link issued for this URL".yellow()),
            }
        }
        LinkAction::Show { code } => {
            let service = LinkService::new(repo, base_url);
            let link = service.find_by_code(&code).await?;

            println!("  Code:    {}", link.code.bright_yellow().bold());
            println!("  Target:  {}", link.target_url.cyan());
            println!(
                "  Created: {}",
                link.created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
        }
    }

    Ok(())
}

/// Displays the number of issued links.
async fn handle_stats(pool: PgPool) -> Result<()> {
    let service = LinkService::new(Arc::new(PgShortLinkRepository::new(Arc::new(pool))), "");

    println!("{}", "Statistics".bright_blue().bold());
    println!();
    println!(
        "  Links: {}",
        service.count().await?.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
