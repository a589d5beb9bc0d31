//! Shelfscan CLI - product lookups, votes, and badges from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Look up a product by barcode (internal service)
//! shelfscan product lookup 4008400404127
//!
//! # Look up the raw Open Food Facts record
//! shelfscan product lookup 4008400404127 --external
//!
//! # Search either catalog
//! shelfscan product search "oat drink"
//! shelfscan product search "oat drink" --external
//!
//! # Vote on a product
//! shelfscan vote up 4008400404127
//! shelfscan vote down 4008400404127
//! shelfscan vote clear 4008400404127
//!
//! # Manage local badges
//! shelfscan badges list
//! shelfscan badges add first-scan
//!
//! # Manage the session token used for authenticated requests
//! shelfscan session set <token>
//! shelfscan session clear
//! ```
//!
//! # Commands
//!
//! - `product` - Catalog lookups and search
//! - `vote` - Cast, flip, or clear votes
//! - `badges` - Inspect and extend the local badge set
//! - `session` - Store or clear the bearer token

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shelfscan")]
#[command(author, version, about = "Shelfscan CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Catalog lookups and search
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Cast, flip, or clear votes
    Vote {
        #[command(subcommand)]
        action: VoteAction,
    },
    /// Inspect and extend the local badge set
    Badges {
        #[command(subcommand)]
        action: BadgesAction,
    },
    /// Store or clear the session token
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Fetch one product by barcode
    Lookup {
        /// The barcode (EAN-8/EAN-13/UPC)
        ean: String,

        /// Query the external Open Food Facts catalog instead
        #[arg(long)]
        external: bool,
    },
    /// Full-text search
    Search {
        /// Search terms
        query: String,

        /// Query the external Open Food Facts catalog instead
        #[arg(long)]
        external: bool,
    },
}

#[derive(Subcommand)]
enum VoteAction {
    /// Upvote a product
    Up {
        /// The barcode to vote on
        ean: String,
    },
    /// Downvote a product
    Down {
        /// The barcode to vote on
        ean: String,
    },
    /// Remove your vote
    Clear {
        /// The barcode to clear
        ean: String,
    },
}

#[derive(Subcommand)]
enum BadgesAction {
    /// List earned badges
    List,
    /// Record a badge as earned (idempotent)
    Add {
        /// Badge identifier
        id: String,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Store a bearer token for authenticated requests
    Set {
        /// The token value
        token: String,
    },
    /// Remove the stored token
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Product { action } => match action {
            ProductAction::Lookup { ean, external } => {
                commands::product::lookup(&ean, external).await?;
            }
            ProductAction::Search { query, external } => {
                commands::product::search(&query, external).await?;
            }
        },
        Commands::Vote { action } => match action {
            VoteAction::Up { ean } => commands::vote::cast(&ean, Some(true)).await?,
            VoteAction::Down { ean } => commands::vote::cast(&ean, Some(false)).await?,
            VoteAction::Clear { ean } => commands::vote::cast(&ean, None).await?,
        },
        Commands::Badges { action } => match action {
            BadgesAction::List => commands::badges::list().await?,
            BadgesAction::Add { id } => commands::badges::add(&id).await?,
        },
        Commands::Session { action } => match action {
            SessionAction::Set { token } => commands::session::set(token).await?,
            SessionAction::Clear => commands::session::clear().await?,
        },
    }
    Ok(())
}
