use std::sync::Arc;
use validator::Validate;

use crate::config::Config;
use crate::dto::auth_dto::{LoginPayload, SignupPayload};
use crate::error::{Error, Result};
use crate::models::user::{NewUser, Role, User};
use crate::services::store::Store;
use crate::utils::crypto::{hash_secret, secrets_match, verify_secret};
use crate::utils::token::{issue_token, verify_token, Claims};

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    config: Arc<Config>,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, config: Arc<Config>) -> Self {
        Self { store, config }
    }

    /// Role granted by a signup passkey.
    fn role_for_passkey(&self, passkey: &str) -> Result<Role> {
        if secrets_match(passkey, &self.config.admin_passkey) {
            Ok(Role::Admin)
        } else if secrets_match(passkey, &self.config.user_passkey) {
            Ok(Role::User)
        } else {
            Err(Error::Forbidden("Invalid passkey".to_string()))
        }
    }

    pub async fn signup(&self, payload: SignupPayload) -> Result<User> {
        let form = payload
            .complete()
            .ok_or_else(|| Error::BadRequest("All fields required".to_string()))?;
        form.validate()?;
        let role = self.role_for_passkey(&form.passkey)?;

        if self
            .store
            .username_or_email_taken(&form.username, &form.email)
            .await?
        {
            return Err(Error::Conflict("Username or email already exists".to_string()));
        }

        let user = self
            .store
            .insert_user(NewUser {
                password_hash: hash_secret(&form.password)?,
                passkey_hash: hash_secret(&form.passkey)?,
                first_name: form.first_name,
                last_name: form.last_name,
                username: form.username,
                email: form.email,
                role,
            })
            .await?;

        tracing::info!(user_id = %user.user_id, role = %user.role, "user signed up");
        Ok(user)
    }

    /// Returns a signed token and the authenticated user.
    pub async fn login(&self, payload: LoginPayload) -> Result<(String, User)> {
        let (username, password) = payload
            .credentials()
            .ok_or_else(|| Error::BadRequest("username+password required".to_string()))?;

        let invalid = || Error::Unauthorized("Invalid credentials".to_string());
        let user = self
            .store
            .find_user_by_username(username)
            .await?
            .ok_or_else(invalid)?;
        if !verify_secret(password, &user.password_hash)? {
            tracing::warn!(username = %user.username, "failed login");
            return Err(invalid());
        }

        let token = issue_token(&user, &self.config.jwt_secret, self.config.jwt_ttl_minutes)?;
        Ok((token, user))
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        verify_token(token, &self.config.jwt_secret).map_err(|e| {
            tracing::debug!(error = %e, "rejected bearer token");
            Error::Unauthorized("Invalid or expired token".to_string())
        })
    }
}
