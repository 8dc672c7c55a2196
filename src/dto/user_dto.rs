use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::user::{Role, User};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// `role` stays raw JSON so a wrong type gets the same 400 as an unknown role.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRolePayload {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub role: Option<JsonValue>,
}

impl UpdateRolePayload {
    pub fn role(&self) -> Option<&str> {
        self.role.as_ref().and_then(JsonValue::as_str)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsersCount {
    pub users_count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportsCount {
    pub reports_count: i64,
}
