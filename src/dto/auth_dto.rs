use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::user::{Role, User};

/// Signup body as sent. Absent and `null` fields both arrive as `None`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SignupPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub passkey: Option<String>,
}

/// A signup with every field present and non-blank, names trimmed.
#[derive(Debug, Clone, Validate)]
pub struct SignupForm {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[validate(length(min = 1))]
    pub passkey: String,
}

impl SignupPayload {
    pub fn complete(self) -> Option<SignupForm> {
        let present = |field: Option<String>| field.filter(|v| !v.trim().is_empty());
        let trimmed = |field: Option<String>| present(field).map(|v| v.trim().to_string());
        Some(SignupForm {
            first_name: trimmed(self.first_name)?,
            last_name: trimmed(self.last_name)?,
            username: trimmed(self.username)?,
            email: trimmed(self.email)?,
            password: present(self.password)?,
            passkey: present(self.passkey)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginPayload {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginPayload {
    /// Trimmed username and raw password, when both are non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((username, password))
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SignupResponse {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for SignupResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: SessionUser,
}

impl LoginResponse {
    pub fn new(token: String, user: User) -> Self {
        Self {
            message: "ok".to_string(),
            token,
            user: SessionUser {
                user_id: user.user_id,
                username: user.username,
                role: user.role,
            },
        }
    }
}
