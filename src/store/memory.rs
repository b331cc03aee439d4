//! In-memory store for exercising the migrations without a database

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use futures_util::stream;
use mongodb::bson::{Bson, Document};

use super::{DocumentStore, DocumentStream};
use crate::error::{Error, Result};

/// Document store holding collections in process memory
///
/// Scans yield documents in insertion order, which stands in for the
/// cursor order the migrations rely on.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection, appending the documents in order
    pub fn seed(&self, collection: &str, documents: Vec<Document>) {
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .extend(documents);
    }

    /// Snapshot of a collection's contents, insertion order
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        let collections = self.collections.lock().unwrap();
        collections.get(collection).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn scan(&self, collection: &str) -> Result<DocumentStream> {
        let documents = self.documents(collection);
        Ok(Box::pin(stream::iter(
            documents.into_iter().map(Ok::<_, Error>),
        )))
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<DocumentStream> {
        let matches: Vec<Document> = self
            .documents(collection)
            .into_iter()
            .filter(|doc| matches!(doc.get(field), Some(Bson::String(v)) if v == value))
            .collect();
        Ok(Box::pin(stream::iter(matches.into_iter().map(Ok::<_, Error>))))
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<()> {
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::TryStreamExt;
    use mongodb::bson::doc;

    #[tokio::test]
    async fn test_scan_preserves_insertion_order() {
        let store = MemoryStore::new();
        store.seed(
            "review2",
            vec![doc! { "n": 1 }, doc! { "n": 2 }, doc! { "n": 3 }],
        );

        let docs: Vec<Document> = store.scan("review2").await.unwrap().try_collect().await.unwrap();
        let ns: Vec<i32> = docs.iter().map(|d| d.get_i32("n").unwrap()).collect();
        assert_eq!(ns, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_scan_of_unknown_collection_is_empty() {
        let store = MemoryStore::new();
        let docs: Vec<Document> = store.scan("missing").await.unwrap().try_collect().await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_field_filters_on_string_equality() {
        let store = MemoryStore::new();
        store.seed(
            "review2",
            vec![
                doc! { "business_id": "b1", "text": "a" },
                doc! { "business_id": "b2", "text": "b" },
                doc! { "business_id": "b1", "text": "c" },
            ],
        );

        let docs: Vec<Document> = store
            .find_by_field("review2", "business_id", "b1")
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        let texts: Vec<&str> = docs.iter().map(|d| d.get_str("text").unwrap()).collect();
        assert_eq!(texts, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_insert_appends() {
        let store = MemoryStore::new();
        store.insert("review_counter", doc! { "counter": 1 }).await.unwrap();
        store.insert("review_counter", doc! { "counter": 2 }).await.unwrap();
        assert_eq!(store.documents("review_counter").len(), 2);
    }
}
