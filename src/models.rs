//! Data models for the canonical point-of-interest record.
//!
//! Every point of interest, whether it came from a detail page or from the
//! place API, is normalized into one [`Feature`] in GeoJSON shape:
//! - [`Feature`]: the top-level record with its `type` / `geometry` /
//!   `properties` keys
//! - [`Geometry`]: the spatial value, a point or a polygon depending on the
//!   source representation
//! - [`Properties`]: title, location, description, and nearby places
//! - [`NearbyPlace`]: one entry of the nearby-places list
//!
//! The models use camelCase field names to match the property schema that
//! downstream consumers already expect, hence the `#[allow(non_snake_case)]`
//! attribute.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The canonical output record: one GeoJSON Feature per point of interest.
///
/// A `Feature` is constructed once per detail page or API response, is
/// immutable afterwards, and is terminal: it is handed to the sinks and
/// never fed back into the extraction pipeline. The three top-level keys
/// are always serialized, even when every sub-field is empty or null.
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct Feature {
    /// Constant GeoJSON discriminator, always `"Feature"`.
    #[serde(rename = "type")]
    pub feature_type: String,
    /// The spatial value of the point of interest.
    pub geometry: Geometry,
    /// Everything that is not geometry.
    pub properties: Properties,
}

impl Feature {
    /// Assemble a record with the constant `"Feature"` discriminator.
    pub fn new(geometry: Geometry, properties: Properties) -> Self {
        Self {
            feature_type: "Feature".to_string(),
            geometry,
            properties,
        }
    }
}

/// The spatial value of a [`Feature`].
///
/// The two source representations model location differently, and both
/// shapes are kept as-is rather than converted into one another: detail
/// pages print a flat coordinate pair, the place API reports a polygon
/// outline.
#[derive(Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// Flat numeric coordinates as printed on a detail page. Empty when the
    /// page carries no coordinates label.
    Point {
        /// Whitespace-separated coordinate tokens parsed as numbers.
        coordinates: Vec<f64>,
    },
    /// Polygon outline exactly as the place API reports it (the API spells
    /// the tag lowercase). Empty array when the response has no polygon.
    #[serde(rename = "polygon")]
    Polygon {
        /// Passthrough of the API's nested coordinate structure.
        coordinates: Value,
    },
}

/// Non-spatial attributes of a [`Feature`].
///
/// Missing values serialize as explicit `null`s; keys are never omitted.
#[allow(non_snake_case)]
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct Properties {
    /// The point of interest's name, when the source carries one.
    pub title: Option<String>,
    /// Unstructured mapping with semantic keys such as country/state/place.
    /// Detail pages yield exactly those three keys; the API passes through
    /// whatever mapping it reports.
    pub location: Option<Map<String, Value>>,
    /// Free-text description, when the source carries one.
    pub description: Option<String>,
    /// Nearby points of interest. Detail pages always yield a list
    /// (possibly empty); the API yields `null` when the block is absent.
    pub nearestPlaces: Option<Vec<NearbyPlace>>,
}

/// One entry of the nearby-places list.
#[derive(Debug, PartialEq, Deserialize, Serialize)]
pub struct NearbyPlace {
    /// Name of the nearby point of interest.
    pub name: String,
    /// Distance with its embedded unit (e.g. `"0.4 km"`), never parsed
    /// numerically.
    pub distance: String,
}
