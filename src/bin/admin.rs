//! CLI administration tool for snaplink.
//!
//! Shortens URLs, inspects mappings and checks the database without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (prompts when the URL is omitted)
//! cargo run --bin admin -- shorten example.com/very-long-url
//!
//! # Show a mapping with its click count
//! cargo run --bin admin -- stats Xy12Zq
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Mapping totals and most clicked codes
//! cargo run --bin admin -- db info
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DATABASE_*` components) and
//! `BASE_URL` for printed short URLs.

use snaplink::application::services::ShortenerService;
use snaplink::config::Config;
use snaplink::domain::repositories::MappingRepository;
use snaplink::infrastructure::persistence::PgMappingRepository;
use snaplink::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// Number of rows shown by `db info`.
const TOP_CODES: i64 = 5;

/// CLI tool for managing snaplink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL
    Shorten {
        /// URL to shorten (prompted for if omitted)
        url: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show a mapping and its click count
    Stats {
        /// Short code (case-sensitive)
        code: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show mapping totals and the most clicked codes
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;

    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Shorten { url, yes } => shorten(&pool, &config.base_url, url, yes).await?,
        Commands::Stats { code } => show_stats(&pool, &config.base_url, &code).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Shortens a URL through the same service the API uses.
///
/// Repeat submissions print the existing code instead of creating a new one.
async fn shorten(pool: &PgPool, base_url: &str, url: Option<String>, skip_confirm: bool) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL")
            .interact_text()?,
    };

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Shorten {url}?"))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let repository = Arc::new(PgMappingRepository::new(Arc::new(pool.clone())));
    let service = ShortenerService::new(repository, RandomCodeGenerator::new());

    let outcome = service
        .shorten(&url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!();
    if outcome.is_created() {
        println!("{}", "✅ Short link created".green().bold());
    } else {
        println!("{}", "♻️  URL was already shortened".yellow().bold());
    }

    let mapping = outcome.mapping();
    println!("  Code:      {}", mapping.short_code.bright_yellow().bold());
    println!("  Short URL: {}", mapping.short_url(base_url).cyan());
    println!("  Original:  {}", mapping.original_url.bright_white());
    println!();

    Ok(())
}

/// Prints one mapping.
///
/// # Output Format
///
/// ```text
/// 📊 Xy12Zq
///
///   Original:  https://example.com/very-long-url
///   Short URL: http://localhost:3001/Xy12Zq
///   Clicks:    42
///   Created:   2025-01-15 10:30
/// ```
async fn show_stats(pool: &PgPool, base_url: &str, code: &str) -> Result<()> {
    let repository = PgMappingRepository::new(Arc::new(pool.clone()));

    let mapping = repository
        .find_by_short_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("Short code '{code}' not found"))?;

    println!("{}", format!("📊 {}", mapping.short_code).bright_blue().bold());
    println!();
    println!("  Original:  {}", mapping.original_url.bright_white());
    println!("  Short URL: {}", mapping.short_url(base_url).cyan());
    println!(
        "  Clicks:    {}",
        mapping.click_count.to_string().bright_green().bold()
    );
    println!(
        "  Created:   {}",
        mapping
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let (mappings, clicks): (i64, i64) = sqlx::query_as(
                "SELECT COUNT(*), COALESCE(SUM(click_count), 0)::BIGINT FROM url_mappings",
            )
            .fetch_one(pool)
            .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Mappings:   {}",
                mappings.to_string().bright_green().bold()
            );
            println!(
                "  Clicks:     {}",
                clicks.to_string().bright_green().bold()
            );
            println!();

            let top: Vec<(String, i64)> = sqlx::query_as(
                "SELECT short_code, click_count FROM url_mappings \
                 ORDER BY click_count DESC, created_at ASC LIMIT $1",
            )
            .bind(TOP_CODES)
            .fetch_all(pool)
            .await?;

            if top.is_empty() {
                println!("{}", "  No mappings yet".yellow());
            } else {
                println!(
                    "  {:<12} {:>10}",
                    "Code".bright_white().bold(),
                    "Clicks".bright_white().bold()
                );
                println!("  {}", "─".repeat(23).bright_black());
                for (code, count) in &top {
                    println!("  {:<12} {:>10}", code.cyan(), count);
                }
            }
            println!();
        }
    }

    Ok(())
}
