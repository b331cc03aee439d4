//! Copy reviews into a new collection with a sequence number

use futures_util::TryStreamExt;
use mongodb::bson;
use tracing::info;

use super::Progress;
use crate::error::Result;
use crate::models::SequencedReview;
use crate::store::{require_number, require_str, DocumentStore};

/// Source and target collection names for the backfill
pub struct BackfillParams {
    pub source: String,
    pub target: String,
}

/// Insert one sequenced copy of every source review into the target
/// collection
///
/// Counters start at 1 and increase by 1 in cursor order. Re-running the
/// backfill appends a fresh 1..K run next to the old records; nothing is
/// deduplicated. Returns the number of records inserted.
pub async fn run(store: &dyn DocumentStore, params: &BackfillParams) -> Result<u64> {
    let mut progress = Progress::new("backfill");
    let mut cursor = store.scan(&params.source).await?;

    while let Some(review) = cursor.try_next().await? {
        let record = SequencedReview {
            business_id: require_str(&review, &params.source, "business_id")?,
            text: require_str(&review, &params.source, "text")?,
            stars: require_number(&review, &params.source, "stars")?,
            review_id: require_str(&review, &params.source, "review_id")?,
            user_id: require_str(&review, &params.source, "user_id")?,
            counter: progress.count() + 1,
        };
        store.insert(&params.target, bson::to_document(&record)?).await?;
        progress.tick();
    }

    info!("backfill: inserted {} sequenced records", progress.count());
    Ok(progress.count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use mongodb::bson::{doc, Document};

    fn review(id: &str) -> Document {
        doc! {
            "business_id": "b1",
            "text": format!("text for {id}"),
            "stars": 4,
            "review_id": id,
            "user_id": "u1",
        }
    }

    fn params() -> BackfillParams {
        BackfillParams {
            source: "review2".to_string(),
            target: "review_counter".to_string(),
        }
    }

    #[tokio::test]
    async fn test_backfill_assigns_sequential_counters() {
        let store = MemoryStore::new();
        store.seed("review2", vec![review("r1"), review("r2"), review("r3")]);

        let count = run(&store, &params()).await.unwrap();

        assert_eq!(count, 3);
        let inserted = store.documents("review_counter");
        let counters: Vec<i64> = inserted.iter().map(|d| d.get_i64("counter").unwrap()).collect();
        assert_eq!(counters, vec![1, 2, 3]);
        let ids: Vec<&str> = inserted.iter().map(|d| d.get_str("review_id").unwrap()).collect();
        assert_eq!(ids, vec!["r1", "r2", "r3"]);
    }

    #[tokio::test]
    async fn test_backfill_copies_all_five_fields() {
        let store = MemoryStore::new();
        store.seed("review2", vec![review("r1")]);

        run(&store, &params()).await.unwrap();

        let inserted = store.documents("review_counter");
        let doc = &inserted[0];
        assert_eq!(doc.get_str("business_id").unwrap(), "b1");
        assert_eq!(doc.get_str("text").unwrap(), "text for r1");
        assert_eq!(doc.get_f64("stars").unwrap(), 4.0);
        assert_eq!(doc.get_str("user_id").unwrap(), "u1");
    }

    #[tokio::test]
    async fn test_backfill_rerun_appends_with_fresh_counters() {
        let store = MemoryStore::new();
        store.seed("review2", vec![review("r1"), review("r2")]);

        run(&store, &params()).await.unwrap();
        run(&store, &params()).await.unwrap();

        let counters: Vec<i64> = store
            .documents("review_counter")
            .iter()
            .map(|d| d.get_i64("counter").unwrap())
            .collect();
        assert_eq!(counters, vec![1, 2, 1, 2]);
    }

    #[tokio::test]
    async fn test_backfill_fails_on_missing_user_id() {
        let store = MemoryStore::new();
        store.seed(
            "review2",
            vec![doc! { "business_id": "b1", "text": "t", "stars": 3, "review_id": "r1" }],
        );

        let err = run(&store, &params()).await.unwrap_err();
        assert!(err.is_missing_field());
        assert!(store.documents("review_counter").is_empty());
    }
}
