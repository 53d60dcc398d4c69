//! Shared handler state

use std::sync::Arc;

use crate::catalog::{DocumentProfessorStore, ProfessorService, ProfessorStore};
use crate::document::DocumentStore;
use crate::observability::MetricsRegistry;
use crate::reviews::ReviewCoordinator;
use crate::users::{DocumentUserStore, UserService, UserStore};
use crate::validation::ReviewLimits;

/// Services shared across handlers
pub struct AppState {
    pub professors: ProfessorService,
    pub users: UserService,
    pub reviews: ReviewCoordinator,
    pub metrics: Arc<MetricsRegistry>,
}

impl AppState {
    /// Wire every service to one document store
    pub fn new(db: DocumentStore, limits: ReviewLimits) -> Self {
        let professor_store: Arc<dyn ProfessorStore> = Arc::new(DocumentProfessorStore::new(db.clone()));
        let user_store: Arc<dyn UserStore> = Arc::new(DocumentUserStore::new(db));
        let metrics = Arc::new(MetricsRegistry::new());

        Self {
            professors: ProfessorService::new(professor_store.clone(), metrics.clone()),
            users: UserService::new(user_store.clone(), metrics.clone()),
            reviews: ReviewCoordinator::new(professor_store, user_store, limits, metrics.clone()),
            metrics,
        }
    }

    /// Fresh, empty in-memory state
    pub fn in_memory(limits: ReviewLimits) -> Self {
        Self::new(DocumentStore::new(), limits)
    }
}
