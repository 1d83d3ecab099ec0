//! droplet entry point.
//!
//! Every command emits one picker-feedback JSON document on stdout;
//! logging goes to stderr so the feedback protocol stays clean.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use droplet_core::AppConfig;

mod commands;
mod feedback;
mod render;
mod spawn;

#[derive(Parser)]
#[command(name = "droplet", version, about = "Instant search over a locally mirrored bookmark store")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search the mirrored bookmarks.
    Search {
        /// Search terms, matched against title, description, URL and tags.
        query: Vec<String>,

        /// Restrict to a single collection id.
        #[arg(long)]
        collection: Option<i64>,

        /// Restrict to bookmarks carrying this tag.
        #[arg(long)]
        tag: Option<String>,
    },

    /// Browse the collection hierarchy.
    Browse {
        /// Filter collections by name, including nested ones.
        query: Vec<String>,
    },

    /// Re-fetch every mirrored resource now.
    Refresh,

    /// Detached refresh worker; normally started by the coordinator,
    /// not by hand.
    #[command(hide = true)]
    BackgroundRefresh,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Command::Search { query, collection, tag } => {
            commands::search::run(&config, &query.join(" "), collection, tag).await
        }
        Command::Browse { query } => commands::browse::run(&config, &query.join(" ")).await,
        Command::Refresh => commands::refresh::run(&config).await,
        Command::BackgroundRefresh => commands::refresh::run_background(&config).await,
    }
}
