//! Review Coordinator
//!
//! Owns the dual-write lifecycle of a review.
//!
//! Adding writes the review into the author's user document, then into the
//! professor document, then recomputes the professor's aggregate rating.
//! Removing pulls the review out of the professor document and recomputes.
//!
//! Each store call is an independent single-document write. There is no
//! transaction around the user and professor writes and no rollback: if the
//! professor write fails, the user keeps a review the professor does not
//! have. That case is logged as `REVIEW_DUAL_WRITE_INCOMPLETE` and counted,
//! and the caller receives the professor `NotFound`. A store with
//! multi-document transactions should wrap both pushes in one.
//!
//! Removal leaves the author's copy in place.

use std::sync::Arc;

use super::aggregate;
use super::model::{Deletion, Review};
use crate::catalog::ProfessorStore;
use crate::error::{Resource, ServiceError, ServiceResult, ValidationError};
use crate::identifier::ObjectId;
use crate::observability::{Event, Logger, MetricsRegistry};
use crate::users::UserStore;
use crate::validation::{check_comment, check_identifier, check_rating, ReviewLimits};

/// Review input after validation
#[derive(Debug, Clone, PartialEq, Eq)]
struct ValidReview {
    user_id: ObjectId,
    professor_id: ObjectId,
    comment: String,
    rating: u8,
}

/// Orchestrates review writes across the user and professor stores
pub struct ReviewCoordinator {
    professors: Arc<dyn ProfessorStore>,
    users: Arc<dyn UserStore>,
    limits: ReviewLimits,
    metrics: Arc<MetricsRegistry>,
}

impl ReviewCoordinator {
    pub fn new(
        professors: Arc<dyn ProfessorStore>,
        users: Arc<dyn UserStore>,
        limits: ReviewLimits,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        Self {
            professors,
            users,
            limits,
            metrics,
        }
    }

    pub fn limits(&self) -> &ReviewLimits {
        &self.limits
    }

    fn validate_new(
        &self,
        user_id: &str,
        professor_id: &str,
        comment: &str,
        rating: i64,
    ) -> Result<ValidReview, ValidationError> {
        Ok(ValidReview {
            user_id: check_identifier("userId", user_id)?,
            professor_id: check_identifier("professorId", professor_id)?,
            comment: check_comment(comment, &self.limits)?,
            rating: check_rating(rating)?,
        })
    }

    /// Count and log review input that failed validation.
    ///
    /// Callers that check parts of the input themselves (such as the JSON
    /// shape of the rating) route their failures through here too.
    pub fn reject(&self, err: ValidationError) -> ServiceError {
        self.metrics.increment_reviews_rejected();
        Logger::info(
            Event::ReviewRejected.as_str(),
            &[("reason", err.to_string().as_str())],
        );
        err.into()
    }

    /// Add a review by `user_id` about `professor_id`.
    ///
    /// Steps run strictly in order:
    /// 1. fetch the author (`NotFound(user)`)
    /// 2. build the review with a fresh id and the author's username
    /// 3. push it onto the user (`NotFound(user)` if the user vanished)
    /// 4. push it onto the professor (`NotFound(professor)`, no rollback of 3)
    /// 5. recompute the professor's aggregate
    pub async fn add_review(
        &self,
        user_id: &str,
        professor_id: &str,
        comment: &str,
        rating: i64,
    ) -> ServiceResult<Review> {
        let input = self
            .validate_new(user_id, professor_id, comment, rating)
            .map_err(|e| self.reject(e))?;

        let author = self
            .users
            .find_by_id(input.user_id)
            .await?
            .ok_or(ServiceError::not_found(Resource::User))?;

        let review = Review {
            id: ObjectId::new(),
            user_id: input.user_id,
            professor_id: input.professor_id,
            username: author.username,
            comment: input.comment,
            rating: input.rating,
        };

        let outcome = self.users.push_review(review.user_id, review.clone()).await?;
        if !outcome.matched {
            return Err(ServiceError::not_found(Resource::User));
        }

        match self
            .professors
            .push_review(review.professor_id, review.clone())
            .await
        {
            Ok(outcome) if outcome.matched => {}
            Ok(_) => {
                self.flag_incomplete(&review, "professor not found");
                return Err(ServiceError::not_found(Resource::Professor));
            }
            Err(e) => {
                self.flag_incomplete(&review, &e.to_string());
                return Err(e.into());
            }
        }

        self.recompute(review.professor_id).await?;

        self.metrics.increment_reviews_added();
        Logger::info(
            Event::ReviewAdded.as_str(),
            &[
                ("professor_id", review.professor_id.to_hex().as_str()),
                ("rating", review.rating.to_string().as_str()),
                ("review_id", review.id.to_hex().as_str()),
                ("user_id", review.user_id.to_hex().as_str()),
            ],
        );
        Ok(review)
    }

    /// Review is on the user but not on the professor
    fn flag_incomplete(&self, review: &Review, reason: &str) {
        self.metrics.increment_dual_write_incomplete();
        Logger::warn(
            Event::ReviewDualWriteIncomplete.as_str(),
            &[
                ("professor_id", review.professor_id.to_hex().as_str()),
                ("reason", reason),
                ("review_id", review.id.to_hex().as_str()),
                ("user_id", review.user_id.to_hex().as_str()),
            ],
        );
    }

    /// Remove a review from the professor it belongs to.
    ///
    /// The author's copy is not touched.
    pub async fn remove_review(&self, review_id: &str) -> ServiceResult<Deletion> {
        let review_id = check_identifier("reviewId", review_id).map_err(|e| self.reject(e))?;

        let professor = self
            .professors
            .find_by_review_id(review_id)
            .await?
            .ok_or(ServiceError::not_found(Resource::Review))?;

        let outcome = self.professors.pull_review(professor.id, review_id).await?;
        if !outcome.matched {
            // Professor deleted since the lookup; its reviews went with it
            return Err(ServiceError::not_found(Resource::Review));
        }

        self.recompute(professor.id).await?;

        self.metrics.increment_reviews_removed();
        Logger::info(
            Event::ReviewRemoved.as_str(),
            &[
                ("professor_id", professor.id.to_hex().as_str()),
                ("review_id", review_id.to_hex().as_str()),
            ],
        );
        Ok(Deletion::confirmed())
    }

    /// Re-derive and store the aggregate rating of `professor_id`
    pub async fn recompute(&self, professor_id: ObjectId) -> ServiceResult<Option<f64>> {
        let rating = aggregate::recompute(self.professors.as_ref(), professor_id).await?;

        self.metrics.increment_aggregate_recomputations();
        let rendered = rating.map(|r| r.to_string()).unwrap_or_else(|| "null".to_string());
        Logger::trace(
            Event::AggregateRecomputed.as_str(),
            &[
                ("overall_rating", rendered.as_str()),
                ("professor_id", professor_id.to_hex().as_str()),
            ],
        );
        Ok(rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DocumentProfessorStore, Professor, ProfessorDetails};
    use crate::document::DocumentStore;
    use crate::users::{DocumentUserStore, User};

    struct Fixture {
        coordinator: ReviewCoordinator,
        professors: Arc<DocumentProfessorStore>,
        users: Arc<DocumentUserStore>,
        metrics: Arc<MetricsRegistry>,
    }

    fn fixture() -> Fixture {
        let db = DocumentStore::new();
        let professors = Arc::new(DocumentProfessorStore::new(db.clone()));
        let users = Arc::new(DocumentUserStore::new(db));
        let metrics = Arc::new(MetricsRegistry::new());
        let coordinator = ReviewCoordinator::new(
            professors.clone(),
            users.clone(),
            ReviewLimits::default(),
            metrics.clone(),
        );
        Fixture {
            coordinator,
            professors,
            users,
            metrics,
        }
    }

    async fn seed(f: &Fixture) -> (User, Professor) {
        let user = User::new(ObjectId::new(), "alice".to_string());
        f.users.insert(user.clone()).await.unwrap();
        let professor = Professor::new(
            ObjectId::new(),
            ProfessorDetails {
                professor_name: "Patrick Hill".to_string(),
                department: "Computer Science".to_string(),
                introduction: "Web programming".to_string(),
                picture: "http://example.com/hill.jpg".to_string(),
            },
        );
        f.professors.insert(professor.clone()).await.unwrap();
        (user, professor)
    }

    #[tokio::test]
    async fn test_add_review_writes_both_copies() {
        let f = fixture();
        let (user, professor) = seed(&f).await;

        let review = f
            .coordinator
            .add_review(&user.id.to_hex(), &professor.id.to_hex(), "Great", 5)
            .await
            .unwrap();

        assert_eq!(review.username, "alice");
        assert_eq!(review.professor_id, professor.id);

        let stored_user = f.users.find_by_id(user.id).await.unwrap().unwrap();
        let stored_prof = f.professors.find_by_id(professor.id).await.unwrap().unwrap();
        assert_eq!(stored_user.reviews, vec![review.clone()]);
        assert_eq!(stored_prof.reviews, vec![review]);
        assert_eq!(stored_prof.overall_rating, Some(5.0));
        assert_eq!(f.metrics.snapshot().reviews_added, 1);
    }

    #[tokio::test]
    async fn test_add_review_validation_touches_nothing() {
        let f = fixture();
        let (user, professor) = seed(&f).await;
        let uid = user.id.to_hex();
        let pid = professor.id.to_hex();
        let (uid, pid) = (uid.as_str(), pid.as_str());

        let cases = [
            ("bad", pid, "Great", 5),
            (uid, "bad", "Great", 5),
            (uid, pid, "   ", 5),
            (uid, pid, "Great", 0),
            (uid, pid, "Great", 6),
        ];
        for (u, p, c, r) in cases {
            let err = f.coordinator.add_review(u, p, c, r).await.unwrap_err();
            assert!(err.is_validation(), "expected validation error, got {err}");
        }

        let stored_user = f.users.find_by_id(user.id).await.unwrap().unwrap();
        assert!(stored_user.reviews.is_empty());
        assert_eq!(f.metrics.snapshot().reviews_rejected, 5);
    }

    #[tokio::test]
    async fn test_comment_too_long() {
        let f = fixture();
        let (user, professor) = seed(&f).await;
        let comment = "x".repeat(f.coordinator.limits().max_comment_length + 1);

        let err = f
            .coordinator
            .add_review(&user.id.to_hex(), &professor.id.to_hex(), &comment, 3)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Validation(ValidationError::TooLong { field: "comment", .. })
        ));
    }

    #[tokio::test]
    async fn test_add_review_unknown_user() {
        let f = fixture();
        let (_, professor) = seed(&f).await;

        let err = f
            .coordinator
            .add_review(&ObjectId::new().to_hex(), &professor.id.to_hex(), "Great", 5)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(Resource::User)));

        let stored = f.professors.find_by_id(professor.id).await.unwrap().unwrap();
        assert!(stored.reviews.is_empty());
    }

    #[tokio::test]
    async fn test_add_review_unknown_professor_leaves_user_copy() {
        let f = fixture();
        let (user, _) = seed(&f).await;

        let err = f
            .coordinator
            .add_review(&user.id.to_hex(), &ObjectId::new().to_hex(), "Great", 5)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(Resource::Professor)));

        // No rollback: the user keeps the review
        let stored_user = f.users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored_user.reviews.len(), 1);
        assert_eq!(f.metrics.snapshot().dual_write_incomplete, 1);
        assert_eq!(f.metrics.snapshot().reviews_added, 0);
    }

    #[tokio::test]
    async fn test_remove_review_keeps_user_copy() {
        let f = fixture();
        let (user, professor) = seed(&f).await;

        let review = f
            .coordinator
            .add_review(&user.id.to_hex(), &professor.id.to_hex(), "Okay", 3)
            .await
            .unwrap();

        let deletion = f.coordinator.remove_review(&review.id.to_hex()).await.unwrap();
        assert!(deletion.deleted);

        let stored_prof = f.professors.find_by_id(professor.id).await.unwrap().unwrap();
        assert!(stored_prof.reviews.is_empty());
        assert_eq!(stored_prof.overall_rating, None);

        let stored_user = f.users.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored_user.reviews, vec![review]);
    }

    #[tokio::test]
    async fn test_remove_unknown_review() {
        let f = fixture();
        seed(&f).await;

        let err = f
            .coordinator
            .remove_review(&ObjectId::new().to_hex())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(Resource::Review)));
    }

    #[tokio::test]
    async fn test_remove_twice() {
        let f = fixture();
        let (user, professor) = seed(&f).await;
        let review = f
            .coordinator
            .add_review(&user.id.to_hex(), &professor.id.to_hex(), "Fine", 4)
            .await
            .unwrap();

        f.coordinator.remove_review(&review.id.to_hex()).await.unwrap();
        let err = f
            .coordinator
            .remove_review(&review.id.to_hex())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(Resource::Review)));
    }
}
