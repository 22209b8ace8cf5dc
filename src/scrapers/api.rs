//! Place API extractor.
//!
//! The place API serves the same points of interest as the detail pages,
//! keyed by the numeric identifier embedded in every detail URL
//! (`https://wikimapia.org/12345/slug` → `12345`). One `place.getbyid`
//! request pulls every data block at once; the getters then read single
//! keys out of the response.
//!
//! Unlike a detail page, the response is already structured, so every
//! getter follows the same tolerant rule: key absent (or the wrong shape)
//! means `null`, never an error.

use crate::error::ScrapeError;
use crate::models::{Feature, Geometry, NearbyPlace, Properties};
use crate::utils::truncate_for_log;
use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{instrument, warn};

/// Endpoint of the place API.
pub const API_BASE: &str = "http://api.wikimapia.org/";

/// Data blocks requested with every `place.getbyid` call.
const DATA_BLOCKS: &str = "main,geometry,comments,location,nearest_places,nearest_comments,attached,";

/// Extracts a [`Feature`] from one `place.getbyid` response.
#[derive(Debug)]
pub struct ApiExtractor {
    id: String,
    response: Value,
}

impl ApiExtractor {
    /// Query the place API for the point of interest behind one detail URL.
    ///
    /// The place identifier is path segment 3 of the URL; a URL without one
    /// is rejected up front. A non-2xx response is a hard
    /// [`ScrapeError::Fetch`] naming the URL and the time of failure;
    /// nothing is retried.
    #[instrument(level = "info", skip(client, api_key))]
    pub async fn fetch(client: &Client, url: &str, api_key: &str) -> Result<Self, ScrapeError> {
        let id = place_id(url)?;

        let response = client
            .get(API_BASE)
            .query(&[
                ("key", api_key),
                ("function", "place.getbyid"),
                ("id", id.as_str()),
                ("format", "json"),
                ("pack", ""),
                ("language", "en"),
                ("data_blocks", DATA_BLOCKS),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ScrapeError::fetch(url, response.status()));
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str(&body).map_err(|e| {
            warn!(id = %id, body = %truncate_for_log(&body, 300), "API body is not JSON");
            e
        })?;
        Ok(Self::from_response(id, parsed))
    }

    /// Build an extractor from an already-parsed API response.
    pub fn from_response(id: String, response: Value) -> Self {
        Self { id, response }
    }

    /// Normalize the response into the canonical record.
    ///
    /// Always returns a well-formed [`Feature`]; keys the response does not
    /// carry resolve to `null` (empty array for the polygon).
    #[instrument(level = "debug", skip_all, fields(id = %self.id))]
    pub fn extract(&self) -> Feature {
        Feature::new(
            self.geometry(),
            Properties {
                title: self.title(),
                location: self.location(),
                description: self.description(),
                nearestPlaces: self.nearest_places(),
            },
        )
    }

    fn geometry(&self) -> Geometry {
        let coordinates = self
            .response
            .get("polygon")
            .cloned()
            .unwrap_or_else(|| Value::Array(vec![]));
        Geometry::Polygon { coordinates }
    }

    fn title(&self) -> Option<String> {
        self.response
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn location(&self) -> Option<Map<String, Value>> {
        self.response.get("location").and_then(Value::as_object).cloned()
    }

    fn description(&self) -> Option<String> {
        self.response
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn nearest_places(&self) -> Option<Vec<NearbyPlace>> {
        self.response
            .get("nearestPlaces")
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}

/// Read the place identifier out of a detail URL.
///
/// `https://wikimapia.org/12345/slug` splits on `/` into
/// `["https:", "", "wikimapia.org", "12345", "slug"]`; the identifier is
/// the fixed fourth segment.
fn place_id(url: &str) -> Result<String, ScrapeError> {
    match url.split('/').nth(3) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(ScrapeError::MissingPlaceId {
            url: url.to_string(),
        }),
    }
}
