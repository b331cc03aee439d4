//! Export the first N labeled reviews as a single JSON array
//!
//! The separator is written before each element after the first and the
//! array is always closed, so a collection that runs out before the
//! requested size still produces valid JSON.

use std::io::Write;

use futures_util::TryStreamExt;
use tracing::info;

use super::Progress;
use crate::error::Result;
use crate::models::TrainingSample;
use crate::store::{require_number, require_str, DocumentStore};

/// Collection name and sample size for the training export
pub struct SampleParams {
    pub reviews: String,
    /// Number of qualifying reviews to export
    pub size: u64,
}

/// Export up to `size` reviews with non-empty text as `{text, label}`
/// elements of one JSON array
///
/// The label is the review's star rating. Returns the number of elements
/// written, which is less than `size` when the collection has fewer
/// qualifying reviews.
pub async fn run<W: Write>(
    store: &dyn DocumentStore,
    params: &SampleParams,
    out: &mut W,
) -> Result<u64> {
    let mut progress = Progress::new("sample");
    let mut cursor = store.scan(&params.reviews).await?;

    out.write_all(b"[\n")?;
    while progress.count() < params.size {
        let Some(review) = cursor.try_next().await? else {
            break;
        };

        let text = require_str(&review, &params.reviews, "text")?;
        if text.is_empty() {
            continue;
        }
        let label = require_number(&review, &params.reviews, "stars")?;

        if progress.count() > 0 {
            out.write_all(b",\n")?;
        }
        out.write_all(b"\t")?;
        serde_json::to_writer(&mut *out, &TrainingSample { text, label })?;
        progress.tick();
    }
    out.write_all(b"\n]")?;

    info!(
        "sample: wrote {} of {} requested samples",
        progress.count(),
        params.size
    );
    Ok(progress.count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use mongodb::bson::doc;

    fn review(text: &str, stars: i32) -> mongodb::bson::Document {
        doc! { "business_id": "b1", "text": text, "stars": stars }
    }

    fn params(size: u64) -> SampleParams {
        SampleParams {
            reviews: "review2".to_string(),
            size,
        }
    }

    #[tokio::test]
    async fn test_sample_takes_first_n_qualifying_reviews() {
        let store = MemoryStore::new();
        store.seed(
            "review2",
            vec![review("one", 1), review("two", 2), review("three", 3)],
        );
        let mut out = Vec::new();

        let count = run(&store, &params(2), &mut out).await.unwrap();

        assert_eq!(count, 2);
        let samples: Vec<TrainingSample> =
            serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].text, "one");
        assert_eq!(samples[1].label, 2.0);
    }

    #[tokio::test]
    async fn test_sample_closes_array_on_short_input() {
        let store = MemoryStore::new();
        store.seed("review2", vec![review("only", 5)]);
        let mut out = Vec::new();

        let count = run(&store, &params(10), &mut out).await.unwrap();

        assert_eq!(count, 1);
        let samples: Vec<TrainingSample> =
            serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].label, 5.0);
    }

    #[tokio::test]
    async fn test_sample_of_empty_collection_is_empty_array() {
        let store = MemoryStore::new();
        let mut out = Vec::new();

        let count = run(&store, &params(4), &mut out).await.unwrap();

        assert_eq!(count, 0);
        let samples: Vec<TrainingSample> =
            serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert!(samples.is_empty());
    }

    #[tokio::test]
    async fn test_sample_skips_empty_text_without_counting_it() {
        let store = MemoryStore::new();
        store.seed(
            "review2",
            vec![review("", 1), review("kept", 4), review("also", 2)],
        );
        let mut out = Vec::new();

        let count = run(&store, &params(2), &mut out).await.unwrap();

        assert_eq!(count, 2);
        let samples: Vec<TrainingSample> =
            serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert_eq!(samples[0].text, "kept");
        assert_eq!(samples[1].text, "also");
    }
}
