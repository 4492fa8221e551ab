//! mirrorseed - static-mirror content extraction pipeline.
//!
//! Batch tool that re-derives the storefront's seed data (products,
//! categories, articles, FAQs, reviews, team, pages) from a static HTML
//! mirror of the legacy site.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if mirrorseed::cli::is_verbose() {
        "mirrorseed=info"
    } else {
        "mirrorseed=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    mirrorseed::cli::run()
}
