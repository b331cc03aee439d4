//! MongoDB-backed implementation of the store seam

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Database};
use tracing::debug;

use super::{DocumentStore, DocumentStream};
use crate::config::StoreConfig;
use crate::error::{Error, Result};

/// Document store backed by a live MongoDB database
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Connect to the database named in `config`
    ///
    /// An unreachable server or a malformed URI surfaces as a
    /// `Connection` error before any procedure runs.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(Error::connection)?;
        debug!("Connected to {}", config.uri);
        Ok(Self {
            database: client.database(&config.database),
        })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn scan(&self, collection: &str) -> Result<DocumentStream> {
        let cursor = self
            .database
            .collection::<Document>(collection)
            .find(doc! {})
            .await?;
        Ok(Box::pin(cursor.map_err(Error::from)))
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<DocumentStream> {
        let mut filter = Document::new();
        filter.insert(field, value);
        let cursor = self
            .database
            .collection::<Document>(collection)
            .find(filter)
            .await?;
        Ok(Box::pin(cursor.map_err(Error::from)))
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<()> {
        self.database
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;
        Ok(())
    }
}
