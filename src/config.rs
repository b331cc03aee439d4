//! Connection settings for the source document store

use serde::{Deserialize, Serialize};

/// Where the review database lives
///
/// Defaults match the deployment the migrations were written against:
/// a local MongoDB on port 29017 holding the `yelp` database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// MongoDB connection string
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Database holding the review collections
    #[serde(default = "default_database")]
    pub database: String,
}

fn default_uri() -> String {
    "mongodb://localhost:29017".to_string()
}

fn default_database() -> String {
    "yelp".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: default_database(),
        }
    }
}
