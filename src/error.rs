//! Error types shared by the migration procedures

use std::fmt;
use thiserror::Error;

/// Result type for migration operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes of a migration run
///
/// Every variant is fatal: the run aborts on the first error and whatever
/// was already written stays on disk or in the target collection.
#[derive(Error, Debug)]
pub enum Error {
    /// Could not reach the document store
    #[error("Connection error: {0}")]
    Connection(String),

    /// A document lacks a field every record is expected to carry
    #[error("Missing field `{field}` in `{collection}` document")]
    MissingField { collection: String, field: String },

    /// Writing to the output sink failed
    #[error("Write error: {0}")]
    Write(#[from] std::io::Error),

    /// Serializing an output record failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The document store reported an error mid-operation
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

impl Error {
    /// Create a connection error
    pub fn connection<E: fmt::Display>(err: E) -> Self {
        Self::Connection(err.to_string())
    }

    /// Create a missing-field error for a document in `collection`
    pub fn missing_field(collection: &str, field: &str) -> Self {
        Self::MissingField {
            collection: collection.to_string(),
            field: field.to_string(),
        }
    }

    /// Create a serialization error
    pub fn serialization<E: fmt::Display>(err: E) -> Self {
        Self::Serialization(err.to_string())
    }

    /// Check if this is a missing-field error
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err)
    }
}

impl From<mongodb::bson::ser::Error> for Error {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::serialization(err)
    }
}
