use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::report::NewReport;
use crate::models::user::{NewUser, Role, User};

/// Persistence used by the request handlers.
///
/// [`PgStore`](crate::services::pg_store::PgStore) is the production
/// implementation; tests substitute their own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Current time according to the database; doubles as a liveness check.
    async fn now(&self) -> Result<DateTime<Utc>>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn username_or_email_taken(&self, username: &str, email: &str) -> Result<bool>;

    async fn insert_user(&self, user: NewUser) -> Result<User>;

    /// Newest first.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Returns `false` when no such user exists.
    async fn delete_user(&self, user_id: Uuid) -> Result<bool>;

    async fn update_user_role(&self, user_id: Uuid, role: Role) -> Result<Option<User>>;

    async fn count_users(&self) -> Result<i64>;

    /// Records an export; an author that no longer exists is stored as `None`.
    async fn record_report(&self, report: NewReport) -> Result<()>;

    async fn count_reports(&self) -> Result<i64>;
}
