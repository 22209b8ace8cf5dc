//! Error types for crawl, extraction, and storage operations.
//!
//! Only genuinely unrecoverable conditions surface as errors: a fetch that
//! came back non-success, a detail URL without a place identifier, an API
//! body that is not JSON, and sink failures. Per-field extraction problems
//! never reach this type from the outside; the getters degrade to their
//! documented defaults instead (see `scrapers::html` and `scrapers::api`).

use chrono::{DateTime, Local};
use reqwest::StatusCode;

/// Error type for the scraper.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The fetch came back with a non-success status. Fatal for that one
    /// URL only; the crawl of the remaining URLs continues.
    #[error("{timestamp} couldn't scrape {url}: HTTP {status}")]
    Fetch {
        /// The URL that failed to fetch.
        url: String,
        /// The non-success status the server returned.
        status: StatusCode,
        /// When the failure was observed.
        timestamp: DateTime<Local>,
    },

    /// Connection-level failure before any status was received.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The detail URL carries no place identifier in its path.
    #[error("no place id in path segment 3 of {url}")]
    MissingPlaceId {
        /// The URL that could not be split into a place identifier.
        url: String,
    },

    /// The address block does not follow the `Country , State , Place`
    /// three-part layout the fixed-offset heuristic expects.
    #[error("address has {found} comma-separated parts, expected 3 (`Country , State , Place`)")]
    AddressFormat {
        /// How many comma-separated parts were actually found.
        found: usize,
    },

    /// The API response body was not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Appending to the output file failed.
    #[error("output file write failed: {0}")]
    Io(#[from] std::io::Error),

    /// Converting a record to a store document failed.
    #[error("BSON conversion failed: {0}")]
    Bson(#[from] mongodb::bson::ser::Error),

    /// The document store rejected an operation.
    #[error("document store error: {0}")]
    Storage(#[from] mongodb::error::Error),
}

impl ScrapeError {
    /// Build a [`ScrapeError::Fetch`] stamped with the current local time.
    pub fn fetch(url: &str, status: StatusCode) -> Self {
        Self::Fetch {
            url: url.to_string(),
            status,
            timestamp: Local::now(),
        }
    }
}
