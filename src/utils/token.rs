use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::Result;
use crate::models::user::{Role, User};
use crate::utils::time::now;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub username: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

pub fn issue_token(user: &User, secret: &str, ttl_minutes: i64) -> Result<String> {
    let issued_at = now();
    let expires_at = issued_at + Duration::minutes(ttl_minutes);
    let claims = Claims {
        sub: user.user_id.to_string(),
        username: user.username.clone(),
        role: user.role,
        iat: issued_at.timestamp() as usize,
        exp: expires_at.timestamp() as usize,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user(role: Role) -> User {
        User {
            user_id: Uuid::new_v4(),
            first_name: "Ana".into(),
            last_name: "Reyes".into(),
            username: "ana".into(),
            email: "ana@example.com".into(),
            password_hash: String::new(),
            role,
            passkey_hash: String::new(),
            created_at: now(),
        }
    }

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let user = user(Role::Admin);
        let token = issue_token(&user, "s3cret", 60).unwrap();
        let claims = verify_token(&token, "s3cret").unwrap();
        assert_eq!(claims.sub, user.user_id.to_string());
        assert_eq!(claims.username, "ana");
        assert!(claims.is_admin());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(&user(Role::User), "s3cret", 60).unwrap();
        assert!(verify_token(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue_token(&user(Role::User), "s3cret", -10).unwrap();
        assert!(verify_token(&token, "s3cret").is_err());
    }
}
