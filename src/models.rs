//! Output record shapes
//!
//! Each record is built once per source document, serialized, and dropped.
//! Nothing here is persisted by the crate itself; the field names are the
//! wire format of the export files and the backfill collection.

use serde::{Deserialize, Serialize};

/// One restaurant merged with the text of all its reviews
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergedReview {
    pub business_id: String,
    /// Every matching review text, concatenated in cursor order with no
    /// separator between fragments
    pub text: String,
    pub category: String,
}

/// A single review projected down to its business and text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessReview {
    pub business_id: String,
    pub text: String,
}

/// A labeled example for training a rating classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSample {
    pub text: String,
    /// Star rating carried over as the label
    pub label: f64,
}

/// A review copied into the sequenced collection by the backfill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequencedReview {
    pub business_id: String,
    pub text: String,
    pub stars: f64,
    pub review_id: String,
    pub user_id: String,
    /// Process-local sequence number, starting at 1 per run
    pub counter: u64,
}
