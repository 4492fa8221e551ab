//! CLI parser and command dispatch.

mod articles;
mod categories;
mod content;
mod products;
mod resolve_cmd;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{LoadOptions, Settings};

#[derive(Parser)]
#[command(name = "mseed")]
#[command(about = "Extract structured seed data from the legacy site mirror")]
#[command(version)]
pub struct Cli {
    /// Mirror root directory (overrides config file)
    #[arg(short, long, global = true, env = "MIRRORSEED_MIRROR_DIR")]
    mirror: Option<PathBuf>,

    /// Output data directory (overrides config file)
    #[arg(short, long, global = true, env = "MIRRORSEED_OUTPUT_DIR")]
    out: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Legacy site origin for absolutizing relative URLs
    #[arg(long, global = true, env = "MIRRORSEED_SITE_BASE")]
    site_base: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Extract product listings
    Products,

    /// Extract the canonical category taxonomy
    Categories,

    /// Extract published blog posts
    Articles,

    /// Extract the FAQ accordion
    Faqs,

    /// Extract customer reviews
    Reviews,

    /// Extract team member profiles
    Team,

    /// Extract the fixed set of static pages
    Pages,

    /// Run every extraction job (categories first, since reconciliation
    /// reads its output)
    All,

    /// Show where category labels would reconcile
    Resolve {
        /// One or more free-text labels
        labels: Vec<String>,
    },
}

/// Run the CLI.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(LoadOptions {
        config_path: cli.config,
        mirror_dir: cli.mirror,
        output_dir: cli.out,
        site_base: cli.site_base,
    })?;

    match cli.command {
        Commands::Products => products::cmd_products(&settings),
        Commands::Categories => categories::cmd_categories(&settings),
        Commands::Articles => articles::cmd_articles(&settings),
        Commands::Faqs => content::cmd_faqs(&settings),
        Commands::Reviews => content::cmd_reviews(&settings),
        Commands::Team => content::cmd_team(&settings),
        Commands::Pages => content::cmd_pages(&settings),
        Commands::All => {
            categories::cmd_categories(&settings)?;
            products::cmd_products(&settings)?;
            articles::cmd_articles(&settings)?;
            content::cmd_faqs(&settings)?;
            content::cmd_reviews(&settings)?;
            content::cmd_team(&settings)?;
            content::cmd_pages(&settings)
        }
        Commands::Resolve { labels } => resolve_cmd::cmd_resolve(&settings, &labels),
    }
}
