//! MongoDB sink and collection administration.
//!
//! Each crawled location gets its own collection; a record lands there once
//! per extraction with no explicit key, so uniqueness is whatever the store
//! provides. The collections act as an expiring cache: a TTL index makes
//! records vanish after the configured interval, and the existence check
//! tells the caller whether a location was crawled recently enough for its
//! collection to still be around.

use crate::error::ScrapeError;
use crate::models::Feature;
use mongodb::bson::Document;
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Connect to the document store.
#[instrument(level = "info", skip(uri))]
pub async fn connect(uri: &str) -> Result<Client, ScrapeError> {
    let client = Client::with_uri_str(uri).await?;
    debug!("Connected to document store");
    Ok(client)
}

/// Handle to a named collection, ready to insert into or query.
pub fn collection_handle(client: &Client, db: &str, collection: &str) -> Collection<Document> {
    client.database(db).collection::<Document>(collection)
}

/// Insert one [`Feature`] as a single document.
///
/// No explicit key is set; the store assigns its own identifier.
#[instrument(level = "debug", skip_all, fields(collection = %collection.name()))]
pub async fn insert_feature(
    collection: &Collection<Document>,
    feature: &Feature,
) -> Result<(), ScrapeError> {
    let document = mongodb::bson::to_document(feature)?;
    collection.insert_one(document).await?;
    debug!("Inserted feature");
    Ok(())
}

/// Create a TTL index on `field` in every given collection.
///
/// Records then expire `ttl` after the indexed field's timestamp, which is
/// what keeps a crawled location's collection from growing stale forever.
#[instrument(level = "info", skip(collections), fields(field = %field, ttl_secs = ttl.as_secs()))]
pub async fn create_ttl_in_collections(
    field: &str,
    ttl: Duration,
    collections: &[Collection<Document>],
) -> Result<(), ScrapeError> {
    for collection in collections {
        let mut keys = Document::new();
        keys.insert(field, 1);
        let options = IndexOptions::builder().expire_after(ttl).build();
        let index = IndexModel::builder().keys(keys).options(options).build();

        collection.create_index(index).await?;
        info!(collection = %collection.name(), "Created TTL index");
    }
    Ok(())
}

/// Check whether a collection already exists in the database.
///
/// An existing collection means the location was crawled recently enough
/// that its records have not expired yet.
#[instrument(level = "debug", skip(client))]
pub async fn collection_exists(
    client: &Client,
    db: &str,
    collection: &str,
) -> Result<bool, ScrapeError> {
    let names = client.database(db).list_collection_names().await?;
    Ok(names.iter().any(|name| name == collection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Geometry, Properties};
    use serde_json::json;

    #[test]
    fn test_feature_converts_to_document_with_all_keys() {
        let feature = Feature::new(
            Geometry::Polygon {
                coordinates: json!([[34.77, 32.08]]),
            },
            Properties {
                title: Some("Park X".to_string()),
                location: None,
                description: None,
                nearestPlaces: None,
            },
        );

        let document = mongodb::bson::to_document(&feature).unwrap();
        assert_eq!(document.get_str("type").unwrap(), "Feature");
        assert!(document.contains_key("geometry"));
        let properties = document.get_document("properties").unwrap();
        assert_eq!(properties.get_str("title").unwrap(), "Park X");
        // Absent values survive as explicit nulls, not missing keys.
        assert!(properties.contains_key("location"));
        assert!(properties.get("location").unwrap().as_null().is_some());
    }
}
