//! Append-only file sink.
//!
//! Each record is written as one JSON-encoded object followed by `,\n`, so
//! the file accumulates a comma-joined sequence of objects. That is NOT a
//! valid JSON array on its own; downstream consumers wrap it in brackets
//! (and strip the trailing comma) before parsing. The format is kept
//! as-is for compatibility with the files already in circulation.

use crate::error::ScrapeError;
use crate::models::Feature;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

/// Append one serialized [`Feature`] to the output file.
///
/// Creates the file on first use. Each call performs a single write of the
/// record plus its `,\n` separator.
#[instrument(level = "debug", skip(feature), fields(path = %path))]
pub async fn append_feature(path: &str, feature: &Feature) -> Result<(), ScrapeError> {
    let mut line = serde_json::to_string(feature)?;
    line.push_str(",\n");

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;

    debug!(bytes = line.len(), "Appended feature");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Geometry, Properties};

    fn sample_feature(title: &str) -> Feature {
        Feature::new(
            Geometry::Point {
                coordinates: vec![32.0, 34.0],
            },
            Properties {
                title: Some(title.to_string()),
                location: None,
                description: None,
                nearestPlaces: Some(vec![]),
            },
        )
    }

    fn scratch_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("wikimapia_scraper_{}_{}", std::process::id(), name))
            .to_string_lossy()
            .into_owned()
    }

    #[tokio::test]
    async fn test_each_record_ends_with_comma_newline() {
        let path = scratch_path("single.json");
        let _ = tokio::fs::remove_file(&path).await;

        append_feature(&path, &sample_feature("One")).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(contents.starts_with('{'));
        assert!(contents.ends_with(",\n"));

        let record: Feature = serde_json::from_str(contents.trim_end_matches(",\n")).unwrap();
        assert_eq!(record.properties.title, Some("One".to_string()));

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_appends_accumulate_a_comma_joined_sequence() {
        let path = scratch_path("multi.json");
        let _ = tokio::fs::remove_file(&path).await;

        append_feature(&path, &sample_feature("One")).await.unwrap();
        append_feature(&path, &sample_feature("Two")).await.unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line.ends_with(',')));

        // The documented consumer-side repair: wrap and drop the last comma.
        let wrapped = format!("[{}]", contents.trim_end().trim_end_matches(','));
        let records: Vec<Feature> = serde_json::from_str(&wrapped).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].properties.title, Some("Two".to_string()));

        let _ = tokio::fs::remove_file(&path).await;
    }
}
