//! Document-store access layer
//!
//! Procedures talk to the store through the `DocumentStore` trait so the
//! same code runs against MongoDB in production and an in-memory store in
//! tests. The trait is deliberately narrow: a full scan, a filtered scan
//! for the join lookup, and a single-document insert are all the
//! migrations need.

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use mongodb::bson::{Bson, Document};

use crate::error::{Error, Result};

/// A one-pass cursor over the documents of a collection
pub type DocumentStream = BoxStream<'static, Result<Document>>;

/// Minimal capabilities the migrations need from the document store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Scan a whole collection in store order
    async fn scan(&self, collection: &str) -> Result<DocumentStream>;

    /// Scan the documents whose `field` equals `value`
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<DocumentStream>;

    /// Append one document to a collection
    async fn insert(&self, collection: &str, document: Document) -> Result<()>;
}

/// Extract a string field, failing if it is absent or not a string
pub fn require_str(document: &Document, collection: &str, field: &str) -> Result<String> {
    match document.get(field) {
        Some(Bson::String(value)) => Ok(value.clone()),
        _ => Err(Error::missing_field(collection, field)),
    }
}

/// Extract a numeric field, widening integers to `f64`
///
/// Star ratings show up as doubles or integers depending on which tool
/// produced the dump.
pub fn require_number(document: &Document, collection: &str, field: &str) -> Result<f64> {
    match document.get(field) {
        Some(Bson::Double(value)) => Ok(*value),
        Some(Bson::Int32(value)) => Ok(f64::from(*value)),
        Some(Bson::Int64(value)) => Ok(*value as f64),
        _ => Err(Error::missing_field(collection, field)),
    }
}
