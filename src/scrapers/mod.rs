//! Extraction strategies for wikimapia points of interest.
//!
//! This module contains the link-discovery collector and the two extraction
//! strategies that normalize a point of interest into a [`Feature`]:
//!
//! | Source | Module | Input | Geometry reported |
//! |--------|--------|-------|-------------------|
//! | Detail page | [`html`] | HTML body of a place page | `Point` |
//! | Place API | [`api`] | JSON response of `place.getbyid` | `polygon` |
//!
//! Both strategies honor the same output contract: `extract()` always
//! yields a well-formed [`Feature`], substituting documented defaults for
//! whatever the source does not carry. Which strategy runs is decided by
//! the caller up front via [`Extractor::fetch`], never by probing the
//! content at runtime.
//!
//! [`links`] feeds the strategies: it enumerates candidate detail pages
//! from a country/region/district listing page.

pub mod api;
pub mod html;
pub mod links;

use crate::cli::SourceKind;
use crate::error::ScrapeError;
use crate::models::Feature;
use api::ApiExtractor;
use html::HtmlExtractor;
use reqwest::Client;

/// The two extraction strategies behind one `extract()` contract.
#[derive(Debug)]
pub enum Extractor {
    /// Parse the place's HTML detail page.
    Html(HtmlExtractor),
    /// Query the place API with the identifier taken from the detail URL.
    Api(ApiExtractor),
}

impl Extractor {
    /// Fetch the content for one detail URL with the requested strategy.
    ///
    /// A non-success response is a hard [`ScrapeError::Fetch`] for this URL;
    /// no retry is attempted and no [`Feature`] is produced.
    pub async fn fetch(
        client: &Client,
        url: &str,
        source: SourceKind,
        api_key: &str,
    ) -> Result<Self, ScrapeError> {
        match source {
            SourceKind::Html => Ok(Self::Html(HtmlExtractor::fetch(client, url).await?)),
            SourceKind::Api => Ok(Self::Api(ApiExtractor::fetch(client, url, api_key).await?)),
        }
    }

    /// Normalize the fetched content into the canonical record.
    pub fn extract(&self) -> Feature {
        match self {
            Self::Html(extractor) => extractor.extract(),
            Self::Api(extractor) => extractor.extract(),
        }
    }
}
