//! Join restaurants with their reviews and export one merged record each

use std::io::Write;

use futures_util::TryStreamExt;
use tracing::info;

use super::{write_json_line, Progress};
use crate::error::Result;
use crate::models::MergedReview;
use crate::store::{require_str, DocumentStore};

/// Collection names for the merge export
pub struct MergeParams {
    /// Primary collection, one document per restaurant
    pub restaurants: String,
    /// Secondary collection, joined on `business_id`
    pub reviews: String,
}

/// Export one JSON line per restaurant carrying the concatenated text of
/// all its reviews
///
/// Review texts are appended in cursor order with no separator between
/// fragments. A restaurant whose reviews carry no text is skipped.
/// Returns the number of records written.
pub async fn run<W: Write>(
    store: &dyn DocumentStore,
    params: &MergeParams,
    out: &mut W,
) -> Result<u64> {
    let mut progress = Progress::new("merge");
    let mut restaurants = store.scan(&params.restaurants).await?;

    while let Some(restaurant) = restaurants.try_next().await? {
        let business_id = require_str(&restaurant, &params.restaurants, "business_id")?;
        let category = require_str(&restaurant, &params.restaurants, "categories")?;

        let mut text = String::new();
        let mut reviews = store
            .find_by_field(&params.reviews, "business_id", &business_id)
            .await?;
        while let Some(review) = reviews.try_next().await? {
            text.push_str(&require_str(&review, &params.reviews, "text")?);
        }

        if text.is_empty() {
            continue;
        }

        write_json_line(
            out,
            &MergedReview {
                business_id,
                text,
                category,
            },
        )?;
        progress.tick();
    }

    info!("merge: wrote {} merged records", progress.count());
    Ok(progress.count())
}
