//! Aggregate rating recomputation
//!
//! The cached `overallRating` of a professor is always re-derived from the
//! full current `reviews` sequence, never adjusted by a delta. Running it
//! again after a missed or reordered update yields the correct value.

use super::model::Review;
use crate::catalog::ProfessorStore;
use crate::error::{Resource, ServiceError, ServiceResult};
use crate::identifier::ObjectId;

/// Arithmetic mean of the ratings, `None` for no reviews
pub fn mean_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: u64 = reviews.iter().map(|r| u64::from(r.rating)).sum();
    Some(sum as f64 / reviews.len() as f64)
}

/// Read the professor's reviews, write back their mean.
///
/// Returns the value written.
pub async fn recompute(
    store: &dyn ProfessorStore,
    professor_id: ObjectId,
) -> ServiceResult<Option<f64>> {
    let professor = store
        .find_by_id(professor_id)
        .await?
        .ok_or(ServiceError::not_found(Resource::Professor))?;

    let rating = mean_rating(&professor.reviews);

    let outcome = store.set_overall_rating(professor_id, rating).await?;
    if !outcome.matched {
        return Err(ServiceError::not_found(Resource::Professor));
    }
    Ok(rating)
}
