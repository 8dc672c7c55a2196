use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

use lawatch_backend::{
    config::Config,
    error::Result,
    models::report::NewReport,
    models::user::{NewUser, Role, User},
    routes,
    services::{dataset::Dataset, store::Store},
    AppState,
};

pub const ADMIN_PASSKEY: &str = "test-admin-passkey";
pub const USER_PASSKEY: &str = "test-user-passkey";

/// Store backed by plain vectors, for exercising the router without Postgres.
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<Vec<User>>,
    reports: Mutex<Vec<NewReport>>,
}

#[async_trait]
impl Store for InMemoryStore {
    async fn now(&self) -> Result<DateTime<Utc>> {
        Ok(Utc::now())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn username_or_email_taken(&self, username: &str, email: &str) -> Result<bool> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .any(|u| u.username == username || u.email == email))
    }

    async fn insert_user(&self, user: NewUser) -> Result<User> {
        let user = User {
            user_id: Uuid::new_v4(),
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            passkey_hash: user.passkey_hash,
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let mut users = self.users.lock().unwrap().clone();
        users.reverse();
        Ok(users)
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<bool> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.user_id != user_id);
        Ok(users.len() != before)
    }

    async fn update_user_role(&self, user_id: Uuid, role: Role) -> Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        Ok(users.iter_mut().find(|u| u.user_id == user_id).map(|u| {
            u.role = role;
            u.clone()
        }))
    }

    async fn count_users(&self) -> Result<i64> {
        Ok(self.users.lock().unwrap().len() as i64)
    }

    async fn record_report(&self, mut report: NewReport) -> Result<()> {
        let known = {
            let users = self.users.lock().unwrap();
            report
                .user_id
                .filter(|id| users.iter().any(|u| u.user_id == *id))
        };
        report.user_id = known;
        self.reports.lock().unwrap().push(report);
        Ok(())
    }

    async fn count_reports(&self) -> Result<i64> {
        Ok(self.reports.lock().unwrap().len() as i64)
    }
}

impl InMemoryStore {
    pub fn report_authors(&self) -> Vec<Option<Uuid>> {
        self.reports.lock().unwrap().iter().map(|r| r.user_id).collect()
    }
}

pub fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        database_url: "postgres://unused".into(),
        db_max_connections: 1,
        jwt_secret: "integration-test-secret".into(),
        jwt_ttl_minutes: 60,
        admin_passkey: ADMIN_PASSKEY.into(),
        user_passkey: USER_PASSKEY.into(),
        data_dir: data_dir(),
        auth_rps: 1000,
        app_env: "test".into(),
        allowed_origins: vec!["https://lawatch-*.vercel.app".into()],
    }
}

pub fn test_app() -> Router {
    test_app_with_store().0
}

pub fn test_app_with_store() -> (Router, Arc<InMemoryStore>) {
    let config = Arc::new(test_config());
    let dataset = Dataset::load(&config.data_dir).expect("sample dataset");
    let store = Arc::new(InMemoryStore::default());
    let state = AppState::new(config, store.clone(), Arc::new(dataset));
    (routes::router(state), store)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let (status, bytes) = send(app, method, uri, token, body).await;
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Sends a body verbatim, for requests a JSON client would never produce.
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Signs up and logs in, returning the bearer token and user id.
pub async fn register(app: &Router, username: &str, passkey: &str) -> (String, String) {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/signup",
        None,
        Some(serde_json::json!({
            "first_name": "Test",
            "last_name": "User",
            "username": username,
            "email": format!("{}@example.com", username),
            "password": "correct-horse",
            "passkey": passkey,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = send_json(
        app,
        "POST",
        "/api/login",
        None,
        Some(serde_json::json!({ "username": username, "password": "correct-horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["userId"].as_str().unwrap_or_default().to_string(),
    )
}
