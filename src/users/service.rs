//! User registration and lookup

use std::sync::Arc;

use super::model::User;
use super::store::UserStore;
use crate::error::{Resource, ServiceError, ServiceResult};
use crate::identifier::ObjectId;
use crate::observability::{Event, Logger, MetricsRegistry};
use crate::validation::{check_identifier, check_username};

/// Users as needed to author reviews
pub struct UserService {
    users: Arc<dyn UserStore>,
    metrics: Arc<MetricsRegistry>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, metrics: Arc<MetricsRegistry>) -> Self {
        Self { users, metrics }
    }

    pub async fn register(&self, username: &str) -> ServiceResult<User> {
        let username = check_username(username)?;
        let user = User::new(ObjectId::new(), username);

        self.users.insert(user.clone()).await?;

        self.metrics.increment_users_registered();
        Logger::info(
            Event::UserRegistered.as_str(),
            &[("user_id", user.id.to_hex().as_str())],
        );
        Ok(user)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<User> {
        let id = check_identifier("userId", id)?;
        self.users
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::not_found(Resource::User))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentStore;
    use crate::users::DocumentUserStore;

    fn service() -> UserService {
        UserService::new(
            Arc::new(DocumentUserStore::new(DocumentStore::new())),
            Arc::new(MetricsRegistry::new()),
        )
    }

    #[tokio::test]
    async fn test_register_then_get() {
        let service = service();
        let user = service.register("  bob ").await.unwrap();
        assert_eq!(user.username, "bob");
        assert!(user.reviews.is_empty());

        let fetched = service.get(&user.id.to_hex()).await.unwrap();
        assert_eq!(fetched, user);
    }

    #[tokio::test]
    async fn test_register_rejects_bad_username() {
        let err = service().register("x").await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_get_unknown_user() {
        let err = service().get(&ObjectId::new().to_hex()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(Resource::User)));
    }
}
