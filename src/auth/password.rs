use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use super::AuthError;

/// Hash on a blocking thread; argon2 is deliberately slow.
pub async fn hash_password(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hashing(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::Hashing(e.to_string()))?
}

/// False for a wrong password and for an unparseable stored hash.
pub async fn verify_password(password: String, password_hash: String) -> bool {
    tokio::task::spawn_blocking(move || {
        let Ok(parsed) = PasswordHash::new(&password_hash) else {
            tracing::warn!("Stored password hash could not be parsed");
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
    .await
    .unwrap_or(false)
}

/// Policy violations for a candidate password, empty when acceptable.
pub fn check_policy(password: &str, min_length: usize) -> Vec<String> {
    let mut problems = Vec::new();
    if password.chars().count() < min_length {
        problems.push(format!("Passwords must be at least {} characters.", min_length));
    }
    if password.trim().is_empty() {
        problems.push("Password is required.".to_string());
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hashes_verify_only_the_original_password() {
        let hash = hash_password("Tramping1".to_string()).await.unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Tramping1".to_string(), hash.clone()).await);
        assert!(!verify_password("tramping1".to_string(), hash).await);
    }

    #[tokio::test]
    async fn garbage_hash_never_verifies() {
        assert!(!verify_password("anything".to_string(), "not-a-hash".to_string()).await);
    }

    #[test]
    fn policy_enforces_minimum_length() {
        assert!(check_policy("secret", 6).is_empty());
        assert_eq!(check_policy("short", 6), vec!["Passwords must be at least 6 characters."]);
        assert_eq!(check_policy("", 0), vec!["Password is required."]);
    }
}
