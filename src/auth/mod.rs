pub mod password;
pub mod roles;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::database::models::User;

pub use roles::{authorize, READER, WRITER};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub roles: Vec<String>,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user: &User, security: &SecurityConfig) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::minutes(security.jwt_expiry_minutes)).timestamp();

        Self {
            sub: user.id,
            email: user.email.clone(),
            roles: user.roles.clone(),
            iss: security.jwt_issuer.clone(),
            aud: security.jwt_audience.clone(),
            iat: now.timestamp(),
            exp,
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Sign `claims` with the configured HS256 secret.
pub fn issue_token(claims: &Claims, security: &SecurityConfig) -> Result<String, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(security.jwt_secret.as_bytes());
    encode(&Header::new(Algorithm::HS256), claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Check signature, expiry, issuer and audience; return the claims.
pub fn validate_token(token: &str, security: &SecurityConfig) -> Result<Claims, AuthError> {
    if security.jwt_secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(security.jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&security.jwt_issuer]);
    validation.set_audience(&[&security.jwt_audience]);

    decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "writer@example.com".to_string(),
            email: "writer@example.com".to_string(),
            password_hash: String::new(),
            roles: vec![READER.to_string(), WRITER.to_string()],
        }
    }

    #[test]
    fn issued_tokens_validate_and_carry_roles() {
        let security = AppConfig::development().security;
        let user = user();
        let token = issue_token(&Claims::new(&user, &security), &security).unwrap();

        let claims = validate_token(&token, &security).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.roles, vec!["Reader", "Writer"]);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn rejects_tokens_for_another_audience() {
        let security = AppConfig::development().security;
        let mut other = security.clone();
        other.jwt_audience = "https://elsewhere.example.com/".to_string();
        let token = issue_token(&Claims::new(&user(), &other), &other).unwrap();

        assert!(matches!(validate_token(&token, &security), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn rejects_expired_and_tampered_tokens() {
        let security = AppConfig::development().security;
        let mut claims = Claims::new(&user(), &security);
        claims.iat -= 7200;
        claims.exp = claims.iat + 60;
        let expired = issue_token(&claims, &security).unwrap();
        assert!(validate_token(&expired, &security).is_err());

        let mut wrong_key = security.clone();
        wrong_key.jwt_secret = "another-secret".to_string();
        let forged = issue_token(&Claims::new(&user(), &wrong_key), &wrong_key).unwrap();
        assert!(validate_token(&forged, &security).is_err());
    }

    #[test]
    fn empty_secret_is_refused() {
        let mut security = AppConfig::development().security;
        security.jwt_secret.clear();
        let claims = Claims::new(&user(), &security);
        assert!(matches!(issue_token(&claims, &security), Err(AuthError::InvalidSecret)));
    }
}
