use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::user::{Role, User};
use crate::services::store::Store;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn Store>,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.store.list_users().await
    }

    pub async fn delete(&self, user_id: Uuid) -> Result<()> {
        if !self.store.delete_user(user_id).await? {
            return Err(Error::NotFound("User not found".to_string()));
        }
        tracing::info!(%user_id, "user deleted");
        Ok(())
    }

    pub async fn update_role(&self, user_id: Uuid, role: Option<&str>) -> Result<User> {
        let role: Role = role
            .and_then(|r| r.parse().ok())
            .ok_or_else(|| Error::BadRequest("Valid role required".to_string()))?;
        let user = self
            .store
            .update_user_role(user_id, role)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
        tracing::info!(%user_id, %role, "user role updated");
        Ok(user)
    }

    pub async fn count_users(&self) -> Result<i64> {
        self.store.count_users().await
    }

    pub async fn count_reports(&self) -> Result<i64> {
        self.store.count_reports().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::MockStore;
    use crate::utils::time::now;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let mut store = MockStore::new();
        store.expect_delete_user().returning(|_| Ok(false));
        let service = UserService::new(Arc::new(store));

        let result = service.delete(Uuid::new_v4()).await;
        assert!(matches!(result, Err(Error::NotFound(msg)) if msg == "User not found"));
    }

    #[tokio::test]
    async fn role_must_be_admin_or_user() {
        let mut store = MockStore::new();
        store.expect_update_user_role().never();
        let service = UserService::new(Arc::new(store));

        for role in [None, Some("owner"), Some("ADMIN"), Some("")] {
            let result = service.update_role(Uuid::new_v4(), role).await;
            assert!(matches!(result, Err(Error::BadRequest(_))), "{role:?}");
        }
    }

    #[tokio::test]
    async fn role_update_returns_updated_user() {
        let id = Uuid::new_v4();
        let mut store = MockStore::new();
        store
            .expect_update_user_role()
            .with(eq(id), eq(Role::Admin))
            .times(1)
            .returning(|user_id, role| {
                Ok(Some(User {
                    user_id,
                    first_name: "Ana".into(),
                    last_name: "Reyes".into(),
                    username: "ana".into(),
                    email: "ana@example.com".into(),
                    password_hash: String::new(),
                    role,
                    passkey_hash: String::new(),
                    created_at: now(),
                }))
            });
        let service = UserService::new(Arc::new(store));

        let user = service.update_role(id, Some("admin")).await.unwrap();
        assert_eq!(user.role, Role::Admin);
    }
}
