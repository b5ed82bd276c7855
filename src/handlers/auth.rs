use axum::{extract::State, Json};
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::dto::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use crate::api::ApiJson;
use crate::auth::password::{check_policy, hash_password, verify_password};
use crate::auth::roles::canonical_role;
use crate::auth::{issue_token, Claims};
use crate::database::models::User;
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::state::AppState;

pub const REGISTERED_MESSAGE: &str = "User was registered! Please login.";
pub const LOGIN_FAILED_MESSAGE: &str = "Username or password incorrect";

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    info!(username = %request.username, "Registration attempt");

    let mut errors = Vec::new();
    let username = request.username.trim().to_string();
    if username.is_empty() {
        errors.push("Username is required.".to_string());
    }
    errors.extend(check_policy(&request.password, state.config.security.password_min_length));

    let mut roles: Vec<String> = Vec::new();
    for role in &request.roles {
        match canonical_role(role) {
            Some(known) if !roles.iter().any(|r| r == known) => roles.push(known.to_string()),
            Some(_) => {}
            None => errors.push(format!("Role {} does not exist.", role)),
        }
    }

    if !username.is_empty() && state.users.find_by_username(&username).await?.is_some() {
        errors.push(format!("Username '{}' is already taken.", username));
    }

    if !errors.is_empty() {
        let joined = errors.join(", ");
        warn!(username = %username, errors = %joined, "Registration failed");
        return Err(ApiError::bad_request(joined));
    }

    let password_hash = hash_password(request.password).await?;
    let user = User {
        id: Uuid::nil(),
        email: username.clone(),
        username,
        password_hash,
        roles,
    };

    let user = match state.users.insert(user).await {
        Ok(user) => user,
        Err(DatabaseError::Conflict(msg)) => return Err(ApiError::bad_request(msg)),
        Err(e) => return Err(e.into()),
    };

    info!(username = %user.username, roles = %user.roles.join(","), "User registered");
    Ok(Json(MessageResponse {
        message: REGISTERED_MESSAGE.to_string(),
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    info!(username = %request.username, "Login attempt");

    let Some(user) = state.users.find_by_username(request.username.trim()).await? else {
        warn!(username = %request.username, "Login failed");
        return Err(ApiError::bad_request(LOGIN_FAILED_MESSAGE));
    };

    if !verify_password(request.password, user.password_hash.clone()).await {
        warn!(username = %request.username, "Login failed");
        return Err(ApiError::bad_request(LOGIN_FAILED_MESSAGE));
    }

    let security = &state.config.security;
    let jwt_token = issue_token(&Claims::new(&user, security), security)?;

    info!(username = %user.username, roles = %user.roles.join(","), "Login successful");
    Ok(Json(LoginResponse { jwt_token }))
}
