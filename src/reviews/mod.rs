//! # Reviews
//!
//! The dual-write review lifecycle and rating aggregation.
//!
//! A review is created only by [`ReviewCoordinator::add_review`] and
//! destroyed only by [`ReviewCoordinator::remove_review`]. On a professor a
//! review is either present or absent; both transitions recompute the
//! professor's aggregate rating. There is no in-place edit of a review.

pub mod aggregate;
mod coordinator;
mod model;

pub use aggregate::mean_rating;
pub use coordinator::ReviewCoordinator;
pub use model::{Deletion, Review};
