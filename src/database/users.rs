use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::User;
use crate::database::postgres::map_write_error;

/// Account storage. Usernames are unique ignoring ASCII case.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;
    async fn insert(&self, user: User) -> Result<User, DatabaseError>;
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn insert(&self, mut user: User) -> Result<User, DatabaseError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username.eq_ignore_ascii_case(&user.username)) {
            return Err(DatabaseError::Conflict(format!(
                "Username '{}' is already taken.",
                user.username
            )));
        }
        if user.id.is_nil() {
            user.id = Uuid::new_v4();
        }
        users.push(user.clone());
        Ok(user)
    }
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        Ok(
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE lower(username) = lower($1)")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn insert(&self, mut user: User) -> Result<User, DatabaseError> {
        if user.id.is_nil() {
            user.id = Uuid::new_v4();
        }
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username, email, password_hash, roles) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.roles)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match map_write_error(e) {
            DatabaseError::Conflict(_) => {
                DatabaseError::Conflict(format!("Username '{}' is already taken.", user.username))
            }
            other => other,
        })
    }
}
