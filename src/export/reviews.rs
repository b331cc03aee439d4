//! Project every review down to its business id and text

use std::io::Write;

use futures_util::TryStreamExt;
use tracing::info;

use super::{write_json_line, Progress};
use crate::error::Result;
use crate::models::BusinessReview;
use crate::store::{require_str, DocumentStore};

/// Collection name for the projection export
pub struct ReviewsParams {
    pub reviews: String,
}

/// Export one JSON line per review with a non-empty text
///
/// Output order matches cursor order. Returns the number of records
/// written.
pub async fn run<W: Write>(
    store: &dyn DocumentStore,
    params: &ReviewsParams,
    out: &mut W,
) -> Result<u64> {
    let mut progress = Progress::new("reviews");
    let mut cursor = store.scan(&params.reviews).await?;

    while let Some(review) = cursor.try_next().await? {
        let business_id = require_str(&review, &params.reviews, "business_id")?;
        let text = require_str(&review, &params.reviews, "text")?;
        if text.is_empty() {
            continue;
        }

        write_json_line(out, &BusinessReview { business_id, text })?;
        progress.tick();
    }

    info!("reviews: wrote {} records", progress.count());
    Ok(progress.count())
}
