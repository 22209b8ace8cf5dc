//! Listing-page link discovery.
//!
//! Country, region, and district pages all render the same listing
//! template, so one collector serves every crawl depth: callers append
//! path segments as they descend and hand the parts here to be joined.
//! The links to individual points of interest live in the `div.span3`
//! column; only that fragment is consulted.

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, error, info, instrument};
use url::Url;

/// Base URL the listing paths and relative detail hrefs resolve against.
pub const SITE_BASE: &str = "https://wikimapia.org";

/// Collect candidate detail-page links from one listing page.
///
/// Joins `url_parts` into the listing URL and performs exactly one GET.
/// Any failure (unparseable URL, transport error, non-success status)
/// is logged and yields `None`; the collector never retries. A page with
/// no matching anchors yields `Some` of an empty vector, not `None`.
#[instrument(level = "info", skip(client))]
pub async fn collect(client: &Client, url_parts: &[&str]) -> Option<Vec<String>> {
    let listing_url = url_parts.concat();
    let base = match Url::parse(&listing_url) {
        Ok(base) => base,
        Err(e) => {
            error!(url = %listing_url, error = %e, "Listing URL does not parse");
            return None;
        }
    };

    let response = match client.get(&listing_url).send().await {
        Ok(response) => response,
        Err(e) => {
            error!(url = %listing_url, error = %e, "Listing fetch failed");
            return None;
        }
    };
    if !response.status().is_success() {
        error!(
            url = %listing_url,
            status = %response.status(),
            "Listing returned non-success status, did you type the country name correctly?"
        );
        return None;
    }
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            error!(url = %listing_url, error = %e, "Listing body could not be read");
            return None;
        }
    };

    let links = links_from_listing(&base, &body);
    info!(count = links.len(), url = %listing_url, "Collected detail links");
    debug!(?links, "Listing links");
    Some(links)
}

/// Extract detail-page links from a listing page body.
///
/// Returns the `href` of every anchor inside the `div.span3` fragment that
/// does not carry a `data-url` attribute; anchors carrying that attribute
/// open the map widget rather than a detail page and are skipped. hrefs
/// are resolved against `base`. Document order is preserved and nothing is
/// deduplicated.
pub fn links_from_listing(base: &Url, body: &str) -> Vec<String> {
    let anchor_selector = Selector::parse("div.span3 a[href]").unwrap();

    Html::parse_document(body)
        .select(&anchor_selector)
        .filter(|anchor| anchor.value().attr("data-url").is_none())
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter_map(|href| base.join(href).ok())
        .map(|resolved| resolved.to_string())
        .collect()
}
