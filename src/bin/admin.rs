//! CLI administration tool for bang-shortener.
//!
//! Operates directly on the redirect store, without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Check the store connection
//! cargo run --bin admin -- store check
//!
//! # Register a redirect (prints the slug and admin key)
//! cargo run --bin admin -- redirect create https://example.com
//!
//! # Show target and click count of a slug
//! cargo run --bin admin -- redirect show '!aB3x9'
//!
//! # Remove a redirect without its admin key
//! cargo run --bin admin -- redirect delete '!aB3x9'
//! ```
//!
//! # Environment Variables
//!
//! Same store settings as the server: `REDIS_URL` or `REDIS_HOST` and friends.

use bang_shortener::application::services::RedirectRegistry;
use bang_shortener::config::Config;
use bang_shortener::domain::repositories::RedirectRepository;
use bang_shortener::infrastructure::persistence::RedisRedirectRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing bang-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },

    /// Manage redirects
    Redirect {
        #[command(subcommand)]
        action: RedirectAction,
    },
}

/// Store operation subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check store connection
    Check,
}

/// Redirect management subcommands.
#[derive(Subcommand)]
enum RedirectAction {
    /// Register a redirect and print its slug and admin key
    Create {
        /// Target URL (bare http(s)://host.tld)
        url: String,
    },

    /// Show target and click count
    Show {
        /// Slug, including the leading '!'
        slug: String,
    },

    /// Delete a redirect, bypassing the admin key
    Delete {
        /// Slug, including the leading '!'
        slug: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    let repo = RedisRedirectRepository::connect(&config.redis_url)
        .await
        .context("Failed to connect to the redirect store")?;
    let repo: Arc<dyn RedirectRepository> = Arc::new(repo);

    match cli.command {
        Commands::Store { action } => match action {
            StoreAction::Check => check_store(repo).await?,
        },
        Commands::Redirect { action } => match action {
            RedirectAction::Create { url } => {
                create_redirect(repo, config.slug_max_attempts, &url).await?
            }
            RedirectAction::Show { slug } => show_redirect(repo, &slug).await?,
            RedirectAction::Delete { slug, yes } => delete_redirect(repo, &slug, yes).await?,
        },
    }

    Ok(())
}

/// Pings the store.
async fn check_store(repo: Arc<dyn RedirectRepository>) -> Result<()> {
    if repo.health_check().await {
        println!("{}", "✅ Store reachable".green().bold());
        Ok(())
    } else {
        anyhow::bail!("Store did not answer PING")
    }
}

/// Registers a redirect through the registry, so the same validation applies.
async fn create_redirect(
    repo: Arc<dyn RedirectRepository>,
    slug_max_attempts: usize,
    url: &str,
) -> Result<()> {
    let registry = RedirectRegistry::new(repo).with_slug_max_attempts(slug_max_attempts);

    let created = registry
        .create(Some(url))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create redirect: {}", e))?;

    println!("{}", "✅ Redirect created".green().bold());
    println!();
    println!("  Slug: {}", created.slug.cyan());
    println!("  Key:  {}", created.key.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  Save the key now! It cannot be shown again."
            .red()
            .bold()
    );

    Ok(())
}

/// Prints target and click count. The admin key is never displayed.
async fn show_redirect(repo: Arc<dyn RedirectRepository>, slug: &str) -> Result<()> {
    let redirect = repo
        .find(slug)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", slug, e))?;

    match redirect {
        Some(redirect) => {
            println!("{}", "Redirect:".bright_white().bold());
            println!("  Slug:   {}", redirect.slug.cyan());
            println!("  Target: {}", redirect.target_url);
            println!("  Clicks: {}", redirect.clicks.to_string().bright_yellow());
        }
        None => println!("{}", format!("❌ No redirect for {slug}").red()),
    }

    Ok(())
}

/// Removes a redirect after confirmation.
async fn delete_redirect(
    repo: Arc<dyn RedirectRepository>,
    slug: &str,
    skip_confirm: bool,
) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete redirect {slug}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let deleted = repo
        .delete(slug)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete {}: {}", slug, e))?;

    if deleted {
        println!("{}", format!("✅ Deleted {slug}").green().bold());
    } else {
        println!("{}", format!("❌ No redirect for {slug}").red());
    }

    Ok(())
}
