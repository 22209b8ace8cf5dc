//! Feature pipeline: extract one point of interest and fan it out to the
//! two sinks.

use crate::error::ScrapeError;
use crate::models::Feature;
use crate::outputs::{file, store};
use crate::scrapers::Extractor;
use mongodb::bson::Document;
use mongodb::Collection;
use tracing::{info, instrument};

/// Run one fetched extractor through extraction and both sinks.
///
/// The record is appended to the output file first, then inserted into the
/// collection. At most two writes happen and there is no atomicity between
/// them: a store failure does not undo the file append, and a file failure
/// skips the insert. Neither sink is retried.
#[instrument(level = "info", skip_all, fields(output_file = %output_file, collection = %collection.name()))]
pub async fn run(
    extractor: &Extractor,
    output_file: &str,
    collection: &Collection<Document>,
) -> Result<Feature, ScrapeError> {
    let feature = extractor.extract();

    file::append_feature(output_file, &feature).await?;
    store::insert_feature(collection, &feature).await?;

    info!(title = ?feature.properties.title, "Feature written to both sinks");
    Ok(feature)
}
