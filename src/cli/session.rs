use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::Claims;

/// A logged-in client session, persisted between CLI invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub server: String,
    pub username: String,
    pub token: String,
    pub roles: Vec<String>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Read roles and expiry from the token payload.
    ///
    /// The signature is not checked here; the server validates every request.
    pub fn from_token(server: &str, username: &str, token: &str) -> anyhow::Result<Self> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;

        let claims = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map_err(|e| anyhow::anyhow!("Server returned an unreadable token: {}", e))?
            .claims;

        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .ok_or_else(|| anyhow::anyhow!("Token expiry {} is out of range", claims.exp))?;

        Ok(Self {
            server: server.trim_end_matches('/').to_string(),
            username: username.to_string(),
            token: token.to_string(),
            roles: claims.roles,
            expires_at,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
