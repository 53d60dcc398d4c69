//! Professor CRUD
//!
//! Plain single-document operations. None of them write `reviews` or
//! `overallRating`; those belong to the review coordinator.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::model::{Professor, ProfessorDetails, ProfessorSummary};
use super::store::ProfessorStore;
use crate::error::{Resource, ServiceError, ServiceResult};
use crate::identifier::ObjectId;
use crate::observability::{Event, Logger, MetricsRegistry};
use crate::reviews::Deletion;
use crate::validation::{
    check_department, check_identifier, check_introduction, check_picture, check_professor_name,
};

/// Unvalidated professor fields as supplied by a caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorInput {
    pub professor_name: String,
    pub department: String,
    pub introduction: String,
    pub picture: String,
}

impl ProfessorInput {
    fn validate(&self) -> ServiceResult<ProfessorDetails> {
        Ok(ProfessorDetails {
            professor_name: check_professor_name(&self.professor_name)?,
            department: check_department(&self.department)?,
            introduction: check_introduction(&self.introduction)?,
            picture: check_picture(&self.picture)?,
        })
    }
}

/// Professor catalog operations
pub struct ProfessorService {
    professors: Arc<dyn ProfessorStore>,
    metrics: Arc<MetricsRegistry>,
}

impl ProfessorService {
    pub fn new(professors: Arc<dyn ProfessorStore>, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            professors,
            metrics,
        }
    }

    pub async fn create(&self, input: &ProfessorInput) -> ServiceResult<Professor> {
        let details = input.validate()?;
        let professor = Professor::new(ObjectId::new(), details);

        self.professors.insert(professor.clone()).await?;

        self.metrics.increment_professors_created();
        Logger::info(
            Event::ProfessorCreated.as_str(),
            &[("professor_id", professor.id.to_hex().as_str())],
        );
        Ok(professor)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<Professor> {
        let id = check_identifier("professorId", id)?;
        self.professors
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::not_found(Resource::Professor))
    }

    /// Every professor, as listing summaries
    pub async fn list(&self) -> ServiceResult<Vec<ProfessorSummary>> {
        let professors = self.professors.list().await?;
        Ok(professors.iter().map(ProfessorSummary::from).collect())
    }

    /// The `n` best rated professors. Unrated professors sort last; ties keep
    /// listing order.
    pub async fn top(&self, n: usize) -> ServiceResult<Vec<ProfessorSummary>> {
        let mut summaries = self.list().await?;
        summaries.sort_by(|a, b| compare_ratings_desc(a.overall_rating, b.overall_rating));
        summaries.truncate(n);
        Ok(summaries)
    }

    pub async fn top3(&self) -> ServiceResult<Vec<ProfessorSummary>> {
        self.top(3).await
    }

    /// Replace the descriptive fields of a professor
    pub async fn update(&self, id: &str, input: &ProfessorInput) -> ServiceResult<Professor> {
        let id = check_identifier("professorId", id)?;
        let details = input.validate()?;

        let outcome = self.professors.update_details(id, details).await?;
        if !outcome.matched {
            return Err(ServiceError::not_found(Resource::Professor));
        }

        Logger::info(
            Event::ProfessorUpdated.as_str(),
            &[("professor_id", id.to_hex().as_str())],
        );
        self.professors
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::not_found(Resource::Professor))
    }

    pub async fn remove(&self, id: &str) -> ServiceResult<Deletion> {
        let id = check_identifier("professorId", id)?;
        if !self.professors.delete(id).await? {
            return Err(ServiceError::not_found(Resource::Professor));
        }

        self.metrics.increment_professors_removed();
        Logger::info(
            Event::ProfessorRemoved.as_str(),
            &[("professor_id", id.to_hex().as_str())],
        );
        Ok(Deletion::confirmed())
    }
}

fn compare_ratings_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DocumentProfessorStore;
    use crate::document::DocumentStore;

    fn service() -> (ProfessorService, Arc<DocumentProfessorStore>) {
        let store = Arc::new(DocumentProfessorStore::new(DocumentStore::new()));
        let service = ProfessorService::new(store.clone(), Arc::new(MetricsRegistry::new()));
        (service, store)
    }

    fn input(name: &str) -> ProfessorInput {
        ProfessorInput {
            professor_name: name.to_string(),
            department: "Computer Science".to_string(),
            introduction: "Professor at Stevens".to_string(),
            picture: "http://example.com/prof.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (service, _) = service();
        let created = service.create(&input("  Patrick Hill ")).await.unwrap();
        assert_eq!(created.professor_name, "Patrick Hill");
        assert!(created.reviews.is_empty());
        assert!(created.overall_rating.is_none());

        let fetched = service.get(&created.id.to_hex()).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_picture() {
        let (service, _) = service();
        let mut bad = input("Hill");
        bad.picture = "not a url".to_string();
        assert!(service.create(&bad).await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_get_invalid_and_missing() {
        let (service, _) = service();
        assert!(service.get("xyz").await.unwrap_err().is_validation());
        assert!(matches!(
            service.get(&ObjectId::new().to_hex()).await.unwrap_err(),
            ServiceError::NotFound(Resource::Professor)
        ));
    }

    #[tokio::test]
    async fn test_top_orders_by_rating_unrated_last() {
        let (service, store) = service();
        let a = service.create(&input("A")).await.unwrap();
        let b = service.create(&input("B")).await.unwrap();
        let c = service.create(&input("C")).await.unwrap();
        let d = service.create(&input("D")).await.unwrap();

        store.set_overall_rating(a.id, Some(3.5)).await.unwrap();
        store.set_overall_rating(c.id, Some(4.8)).await.unwrap();
        store.set_overall_rating(d.id, Some(1.0)).await.unwrap();

        let top = service.top3().await.unwrap();
        let ids: Vec<_> = top.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![c.id, a.id, d.id]);

        let all = service.top(10).await.unwrap();
        assert_eq!(all.last().unwrap().id, b.id);
    }

    #[tokio::test]
    async fn test_update_preserves_reviews_and_rating() {
        let (service, store) = service();
        let created = service.create(&input("Hill")).await.unwrap();
        store.set_overall_rating(created.id, Some(4.0)).await.unwrap();

        let mut changed = input("Hill");
        changed.department = "Mathematics".to_string();
        let updated = service.update(&created.id.to_hex(), &changed).await.unwrap();

        assert_eq!(updated.department, "Mathematics");
        assert_eq!(updated.overall_rating, Some(4.0));
    }

    #[tokio::test]
    async fn test_update_missing() {
        let (service, _) = service();
        let err = service
            .update(&ObjectId::new().to_hex(), &input("Hill"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(Resource::Professor)));
    }

    #[tokio::test]
    async fn test_remove() {
        let (service, _) = service();
        let created = service.create(&input("Hill")).await.unwrap();
        let id = created.id.to_hex();

        assert!(service.remove(&id).await.unwrap().deleted);
        assert!(matches!(
            service.remove(&id).await.unwrap_err(),
            ServiceError::NotFound(Resource::Professor)
        ));
        assert!(service.list().await.unwrap().is_empty());
    }
}
