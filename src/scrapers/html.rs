//! Detail-page HTML extractor.
//!
//! Place pages render their facts in a handful of well-known spots inside
//! the `#page-content` container: the name in the first `<h1>`, the
//! address line in an `<address>` element, the coordinates after a bold
//! `Coordinates` label, the description in `#place-description`, and the
//! nearby-places list in `#nearby-places`. Everything outside
//! `#page-content` is ignored.
//!
//! Every field degrades gracefully: whatever the page does not carry
//! becomes `None` or an empty list, and the [`Feature`] is emitted anyway.
//! Only the fetch itself can fail.

use crate::error::ScrapeError;
use crate::models::{Feature, Geometry, NearbyPlace, Properties};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

/// Case-sensitive substring match for the bold coordinates label.
static COORDINATES_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new("Coordinates").unwrap());

/// Extracts a [`Feature`] from the HTML body of one place detail page.
#[derive(Debug)]
pub struct HtmlExtractor {
    url: String,
    html: String,
}

impl HtmlExtractor {
    /// Fetch one detail page.
    ///
    /// A non-2xx status is a hard [`ScrapeError::Fetch`] naming the URL and
    /// the time of failure; nothing is retried.
    #[instrument(level = "info", skip(client))]
    pub async fn fetch(client: &Client, url: &str) -> Result<Self, ScrapeError> {
        let response = client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ScrapeError::fetch(url, response.status()));
        }
        Ok(Self::from_body(url, response.text().await?))
    }

    /// Build an extractor from an already-fetched page body.
    pub fn from_body(url: &str, body: String) -> Self {
        Self {
            url: url.to_string(),
            html: body,
        }
    }

    /// Normalize the page into the canonical record.
    ///
    /// Always returns a well-formed [`Feature`]; fields the page does not
    /// carry are substituted with their documented defaults.
    #[instrument(level = "debug", skip_all, fields(url = %self.url))]
    pub fn extract(&self) -> Feature {
        let document = Html::parse_document(&self.html);
        let content_selector = Selector::parse("#page-content").unwrap();

        match document.select(&content_selector).next() {
            Some(content) => Feature::new(geometry(content), properties(content)),
            None => {
                warn!("No #page-content fragment, emitting empty feature");
                Feature::new(
                    Geometry::Point {
                        coordinates: vec![],
                    },
                    Properties {
                        title: None,
                        location: None,
                        description: None,
                        nearestPlaces: Some(vec![]),
                    },
                )
            }
        }
    }
}

fn properties(content: ElementRef) -> Properties {
    Properties {
        title: title(content),
        location: location(content),
        description: description(content),
        nearestPlaces: Some(nearby_places(content)),
    }
}

/// Read the coordinates printed after the bold `Coordinates` label.
///
/// The label's next text sibling holds the whitespace-separated tokens.
/// A missing label, a missing sibling, or a token that does not parse as a
/// number all degrade to an empty coordinate list.
fn geometry(content: ElementRef) -> Geometry {
    let bold_selector = Selector::parse("b").unwrap();

    let coordinates = content
        .select(&bold_selector)
        .find(|label| COORDINATES_LABEL.is_match(&label.text().collect::<String>()))
        .and_then(|label| label.next_sibling())
        .and_then(|sibling| sibling.value().as_text().map(|text| text.text.to_string()))
        .and_then(|text| {
            text.split_whitespace()
                .map(|token| token.parse::<f64>())
                .collect::<Result<Vec<f64>, _>>()
                .ok()
        })
        .unwrap_or_default();

    if coordinates.is_empty() {
        debug!("No usable coordinates label, geometry degrades to empty point");
    }
    Geometry::Point { coordinates }
}

fn title(content: ElementRef) -> Option<String> {
    let heading_selector = Selector::parse("h1").unwrap();
    content
        .select(&heading_selector)
        .next()
        .map(|heading| heading.text().collect::<String>().trim().to_string())
}

fn location(content: ElementRef) -> Option<Map<String, Value>> {
    let address_selector = Selector::parse("address").unwrap();
    let address = content
        .select(&address_selector)
        .next()
        .map(|element| element.text().collect::<String>())?;

    match location_from_address(&address) {
        Ok(location) => Some(location),
        Err(e) => {
            warn!(error = %e, "Address did not match the expected layout, location degrades to null");
            None
        }
    }
}

/// Split an address line into its country / state / place parts.
///
/// The listing template renders addresses as `Country , State , Place`:
/// viewed as whitespace-ish tokens the semantic parts sit at positions 0,
/// 2, and 4 with the literal commas at 1 and 3. This is a fixed-offset
/// heuristic, not a parser. Precondition: at least three comma-separated
/// parts; fewer yield [`ScrapeError::AddressFormat`], extra parts past the
/// third are ignored.
pub(crate) fn location_from_address(address: &str) -> Result<Map<String, Value>, ScrapeError> {
    let parts: Vec<&str> = address.split(',').map(str::trim).collect();
    if parts.len() < 3 {
        return Err(ScrapeError::AddressFormat { found: parts.len() });
    }

    let mut location = Map::new();
    location.insert("country".to_string(), Value::String(parts[0].to_string()));
    location.insert("state".to_string(), Value::String(parts[1].to_string()));
    location.insert("place".to_string(), Value::String(parts[2].to_string()));
    Ok(location)
}

fn description(content: ElementRef) -> Option<String> {
    let description_selector = Selector::parse("#place-description").unwrap();
    content
        .select(&description_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}

/// Read the nearby-places list, pairing each item's link text with its
/// distance label. Items missing either part are skipped; a page without
/// the container yields an empty list.
fn nearby_places(content: ElementRef) -> Vec<NearbyPlace> {
    let container_selector = Selector::parse("#nearby-places").unwrap();
    let item_selector = Selector::parse("li").unwrap();
    let link_selector = Selector::parse("a").unwrap();
    let distance_selector = Selector::parse("span").unwrap();

    let Some(container) = content.select(&container_selector).next() else {
        debug!("No nearby-places container, list degrades to empty");
        return Vec::new();
    };

    container
        .select(&item_selector)
        .filter_map(|item| {
            let name = item.select(&link_selector).next()?.text().collect::<String>();
            let distance = item
                .select(&distance_selector)
                .next()?
                .text()
                .collect::<String>();
            Some(NearbyPlace { name, distance })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DETAIL_URL: &str = "https://wikimapia.org/12345/dizengoff-square";

    fn extractor(body: &str) -> HtmlExtractor {
        HtmlExtractor::from_body(DETAIL_URL, body.to_string())
    }

    fn full_page() -> &'static str {
        r#"
        <html><body>
        <div id="header"><h1>Not the title</h1></div>
        <div id="page-content">
            <h1>Dizengoff Square</h1>
            <address>Israel , Tel Aviv District , Tel Aviv</address>
            <p><b>Coordinates:</b> 32.0809 34.7743</p>
            <div id="place-description">
                A public square in central Tel Aviv.
            </div>
            <div id="nearby-places">
                <ul>
                    <li><a>Dizengoff Center</a><span>0.4 km</span></li>
                    <li><a>Habima Theatre</a><span>1.2 km</span></li>
                </ul>
            </div>
        </div>
        </body></html>
        "#
    }

    #[test]
    fn test_full_page_extracts_every_field() {
        let feature = extractor(full_page()).extract();

        assert_eq!(feature.feature_type, "Feature");
        assert_eq!(
            feature.geometry,
            Geometry::Point {
                coordinates: vec![32.0809, 34.7743]
            }
        );
        assert_eq!(
            feature.properties.title,
            Some("Dizengoff Square".to_string())
        );
        assert_eq!(
            feature.properties.description,
            Some("A public square in central Tel Aviv.".to_string())
        );
        assert_eq!(
            feature.properties.nearestPlaces,
            Some(vec![
                NearbyPlace {
                    name: "Dizengoff Center".to_string(),
                    distance: "0.4 km".to_string(),
                },
                NearbyPlace {
                    name: "Habima Theatre".to_string(),
                    distance: "1.2 km".to_string(),
                },
            ])
        );
    }

    #[test]
    fn test_location_reads_fixed_address_positions() {
        let feature = extractor(full_page()).extract();
        let location = feature.properties.location.unwrap();

        assert_eq!(location["country"], json!("Israel"));
        assert_eq!(location["state"], json!("Tel Aviv District"));
        assert_eq!(location["place"], json!("Tel Aviv"));
    }

    #[test]
    fn test_missing_coordinates_label_degrades_to_empty_point() {
        let body = r#"
            <div id="page-content">
                <h1>Somewhere</h1>
                <p><b>Category:</b> park</p>
            </div>
        "#;
        let feature = extractor(body).extract();
        assert_eq!(
            feature.geometry,
            Geometry::Point {
                coordinates: vec![]
            }
        );
    }

    #[test]
    fn test_malformed_coordinate_tokens_degrade_to_empty_point() {
        let body = r#"
            <div id="page-content">
                <p><b>Coordinates:</b> 32.0809 north-ish</p>
            </div>
        "#;
        let feature = extractor(body).extract();
        assert_eq!(
            feature.geometry,
            Geometry::Point {
                coordinates: vec![]
            }
        );
    }

    #[test]
    fn test_missing_heading_yields_null_title() {
        let body = r#"<div id="page-content"><p>Nothing here</p></div>"#;
        let feature = extractor(body).extract();
        assert_eq!(feature.properties.title, None);
    }

    #[test]
    fn test_short_address_degrades_to_null_location() {
        let body = r#"
            <div id="page-content">
                <address>Israel</address>
            </div>
        "#;
        let feature = extractor(body).extract();
        assert_eq!(feature.properties.location, None);
    }

    #[test]
    fn test_missing_description_yields_null() {
        let body = r#"<div id="page-content"><h1>Bare place</h1></div>"#;
        let feature = extractor(body).extract();
        assert_eq!(feature.properties.description, None);
    }

    #[test]
    fn test_missing_nearby_container_yields_empty_list() {
        let body = r#"<div id="page-content"><h1>Lonely place</h1></div>"#;
        let feature = extractor(body).extract();
        assert_eq!(feature.properties.nearestPlaces, Some(vec![]));
    }

    #[test]
    fn test_nearby_item_without_distance_is_skipped() {
        let body = r#"
            <div id="page-content">
                <div id="nearby-places">
                    <ul>
                        <li><a>Complete</a><span>2 km</span></li>
                        <li><a>No distance</a></li>
                    </ul>
                </div>
            </div>
        "#;
        let feature = extractor(body).extract();
        assert_eq!(
            feature.properties.nearestPlaces,
            Some(vec![NearbyPlace {
                name: "Complete".to_string(),
                distance: "2 km".to_string(),
            }])
        );
    }

    #[test]
    fn test_page_without_content_container_yields_empty_feature() {
        let feature = extractor("<html><body><h1>Elsewhere</h1></body></html>").extract();

        assert_eq!(feature.feature_type, "Feature");
        assert_eq!(
            feature.geometry,
            Geometry::Point {
                coordinates: vec![]
            }
        );
        assert_eq!(feature.properties.title, None);
        assert_eq!(feature.properties.nearestPlaces, Some(vec![]));
    }

    #[test]
    fn test_location_from_address_rejects_two_parts() {
        let result = location_from_address("Israel , Tel Aviv");
        assert!(matches!(
            result,
            Err(ScrapeError::AddressFormat { found: 2 })
        ));
    }

    #[test]
    fn test_location_from_address_ignores_extra_parts() {
        let location = location_from_address("France , Île-de-France , Paris , 4e").unwrap();
        assert_eq!(location["country"], json!("France"));
        assert_eq!(location["state"], json!("Île-de-France"));
        assert_eq!(location["place"], json!("Paris"));
    }
}
