//! Command-line interface definitions for the wikimapia scraper.
//!
//! This module defines the CLI arguments and options using the `clap`
//! crate. Secrets and endpoints can also be provided via environment
//! variables.

use clap::{Parser, ValueEnum};

/// Command-line arguments for the scraper.
///
/// # Examples
///
/// ```sh
/// # Crawl a country's listing page and extract from the detail pages
/// wikimapia_scraper -c country/Israel -o ./israel.json --mongo-collection israel
///
/// # Same crawl, but extract from the place API instead
/// wikimapia_scraper -c country/Israel -o ./israel.json --mongo-collection israel \
///     --source api --api-key YOUR_KEY
///
/// # Give inserted records a one-week expiry
/// wikimapia_scraper -c country/Israel -o ./israel.json --mongo-collection israel \
///     --ttl-seconds 604800
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Listing path under the site base, e.g. "country/Israel"
    #[arg(short, long)]
    pub country: String,

    /// Which source representation to extract from
    #[arg(short, long, value_enum, default_value_t = SourceKind::Html)]
    pub source: SourceKind,

    /// File the extracted features are appended to
    #[arg(short, long)]
    pub output_file: String,

    /// MongoDB connection string
    #[arg(long, env = "MONGO_URI", default_value = "mongodb://localhost:27017")]
    pub mongo_uri: String,

    /// Database holding the per-location collections
    #[arg(long, default_value = "wikimapia")]
    pub mongo_db: String,

    /// Collection the features are inserted into
    #[arg(long)]
    pub mongo_collection: String,

    /// Place API key (only used with --source api)
    #[arg(long, env = "WIKIMAPIA_API_KEY", default_value = "example")]
    pub api_key: String,

    /// Create a TTL index so records expire this many seconds after the
    /// indexed field's timestamp
    #[arg(long)]
    pub ttl_seconds: Option<u64>,

    /// Field the TTL index is created on
    #[arg(long, default_value = "createdAt")]
    pub ttl_field: String,
}

/// Which source representation a point of interest is extracted from.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Parse the place's HTML detail page.
    Html,
    /// Query the place API with the identifier from the detail URL.
    Api,
}
