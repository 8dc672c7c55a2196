use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::report::NewReport;
use crate::models::user::{NewUser, Role, User, UserRow};
use crate::services::store::Store;

const USER_COLUMNS: &str =
    "user_id, first_name, last_name, username, email, password, role, passkey, created_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn now(&self) -> Result<DateTime<Utc>> {
        let (now,): (DateTime<Utc>,) = sqlx::query_as("SELECT NOW()")
            .fetch_one(&self.pool)
            .await?;
        Ok(now)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }

    async fn username_or_email_taken(&self, username: &str, email: &str) -> Result<bool> {
        let (taken,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn insert_user(&self, user: NewUser) -> Result<User> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (first_name, last_name, username, email, password, role, passkey)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.passkey_hash)
        .fetch_one(&self.pool)
        .await?;
        User::try_from(row)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(User::try_from).collect()
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_user_role(&self, user_id: Uuid, role: Role) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET role = $1 WHERE user_id = $2 RETURNING {USER_COLUMNS}"
        ))
        .bind(role.as_str())
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(User::try_from).transpose()
    }

    async fn count_users(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// The author is stored as NULL when the account no longer exists, the
    /// same state `ON DELETE SET NULL` leaves older rows in.
    async fn record_report(&self, report: NewReport) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reports (user_id, parameter, report_date, format, created_at)
            VALUES ((SELECT user_id FROM users WHERE user_id = $1), $2, $3, $4, $5)
            "#,
        )
        .bind(report.user_id)
        .bind(report.parameter.name())
        .bind(report.report_date)
        .bind(report.format.extension())
        .bind(report.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn count_reports(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reports")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
