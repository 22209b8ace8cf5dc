//! # Wikimapia Scraper
//!
//! A crawling and extraction pipeline that enumerates points of interest
//! from wikimapia listing pages, normalizes each one into a GeoJSON
//! Feature, and persists the records to an append-only file and a MongoDB
//! collection.
//!
//! ## Features
//!
//! - Collects detail-page links from a country/region/district listing page
//! - Extracts each point of interest from its HTML detail page or, on
//!   request, from the place API — both normalize into the same record
//! - Appends every record to an output file and inserts it into a
//!   per-location MongoDB collection
//! - Optionally puts a TTL index on the collection so the records behave
//!   as an expiring cache
//!
//! ## Usage
//!
//! ```sh
//! wikimapia_scraper -c country/Israel -o ./israel.json --mongo-collection israel
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Link discovery**: Collect candidate detail links from one listing page
//! 2. **Extraction**: Fetch each detail page (or API response) and normalize
//!    it into a Feature
//! 3. **Output**: Append the record to the output file and insert it into
//!    the store
//!
//! Items are processed strictly one after another; a failed item is logged
//! and skipped without aborting the rest of the crawl.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod error;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use scrapers::{links, Extractor};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("wikimapia_scraper starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.country, ?args.source, ?args.output_file, "Parsed CLI arguments");

    // Early check: ensure the output file's directory is writable
    if let Err(e) = utils::ensure_writable_parent(&args.output_file).await {
        error!(
            path = %args.output_file,
            error = %e,
            "Output location is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // One transport client for the whole crawl; every collaborator borrows it.
    let client = reqwest::Client::new();

    // ---- Document store setup ----
    let mongo = outputs::store::connect(&args.mongo_uri).await?;
    let collection =
        outputs::store::collection_handle(&mongo, &args.mongo_db, &args.mongo_collection);

    match outputs::store::collection_exists(&mongo, &args.mongo_db, &args.mongo_collection).await {
        Ok(true) => info!(
            collection = %args.mongo_collection,
            "Collection already exists; this location was crawled before and its records may still be cached"
        ),
        Ok(false) => debug!(collection = %args.mongo_collection, "Collection does not exist yet"),
        Err(e) => warn!(error = %e, "Collection existence check failed; continuing"),
    }

    if let Some(ttl_seconds) = args.ttl_seconds {
        outputs::store::create_ttl_in_collections(
            &args.ttl_field,
            std::time::Duration::from_secs(ttl_seconds),
            std::slice::from_ref(&collection),
        )
        .await?;
    }

    // ---- Link discovery ----
    let listing_parts = [links::SITE_BASE, "/", args.country.trim_start_matches('/')];
    let Some(detail_urls) = links::collect(&client, &listing_parts).await else {
        error!(country = %args.country, "No links collected; nothing to do");
        return Ok(());
    };
    info!(count = detail_urls.len(), "Detail pages to extract");

    // ---- Extract and persist, one item at a time ----
    let mut succeeded = 0usize;
    let mut failed = 0usize;

    for url in &detail_urls {
        let extractor = match Extractor::fetch(&client, url, args.source, &args.api_key).await {
            Ok(extractor) => extractor,
            Err(e) => {
                error!(%url, error = %e, "Scrape failed; skipping");
                failed += 1;
                continue;
            }
        };

        match pipeline::run(&extractor, &args.output_file, &collection).await {
            Ok(_) => succeeded += 1,
            Err(e) => {
                error!(%url, error = %e, "Sink write failed");
                failed += 1;
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        total = detail_urls.len(),
        succeeded,
        failed,
        "Execution complete"
    );

    Ok(())
}
