use axum::{
    extract::{MatchedPath, Request},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use once_cell::sync::Lazy;

use crate::auth::{authorize, READER, WRITER};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

const READ: &[&str] = &[READER, WRITER];
const WRITE: &[&str] = &[WRITER];

/// Roles required for one method on one route pattern.
#[derive(Debug, Clone)]
pub struct AccessRule {
    pub method: Method,
    pub path: &'static str,
    pub roles: &'static [&'static str],
}

impl AccessRule {
    fn new(method: Method, path: &'static str, roles: &'static [&'static str]) -> Self {
        Self { method, path, roles }
    }
}

/// Route-level role requirements for the protected API.
pub struct AccessPolicy;

static RULES: Lazy<Vec<AccessRule>> = Lazy::new(|| {
    vec![
        AccessRule::new(Method::GET, "/api/regions", READ),
        AccessRule::new(Method::GET, "/api/regions/:id", READ),
        AccessRule::new(Method::POST, "/api/regions", WRITE),
        AccessRule::new(Method::PUT, "/api/regions/:id", WRITE),
        AccessRule::new(Method::DELETE, "/api/regions/:id", WRITE),
        AccessRule::new(Method::GET, "/api/walks", READ),
        AccessRule::new(Method::GET, "/api/walks/:id", READ),
        AccessRule::new(Method::POST, "/api/walks", WRITE),
        AccessRule::new(Method::PUT, "/api/walks/:id", WRITE),
        AccessRule::new(Method::DELETE, "/api/walks/:id", WRITE),
        AccessRule::new(Method::GET, "/api/difficulties", READ),
        AccessRule::new(Method::POST, "/api/images/upload", WRITE),
    ]
});

impl AccessPolicy {
    pub fn rules() -> &'static [AccessRule] {
        &RULES
    }

    /// Roles for `method` on `path`; HEAD follows GET. `None` when no rule exists.
    pub fn required_roles(method: &Method, path: &str) -> Option<&'static [&'static str]> {
        let method = if *method == Method::HEAD { Method::GET } else { method.clone() };
        Self::rules()
            .iter()
            .find(|rule| rule.method == method && rule.path == path)
            .map(|rule| rule.roles)
    }

    /// Methods with a rule on `path`, as an `Allow` header value. `None` for unknown paths.
    pub fn allowed_methods(path: &str) -> Option<String> {
        let methods: Vec<&str> = Self::rules()
            .iter()
            .filter(|rule| rule.path == path)
            .map(|rule| rule.method.as_str())
            .collect();
        if methods.is_empty() {
            None
        } else {
            Some(methods.join(", "))
        }
    }
}

/// Deny the request unless the authenticated caller holds a role the route requires.
///
/// Runs after `jwt_auth_middleware`. A known route called with a method it has no
/// rule for is 405 with `Allow`; anything else without a rule is denied.
pub async fn role_guard(request: Request, next: Next) -> Result<Response, ApiError> {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    let Some(required) = AccessPolicy::required_roles(request.method(), &path) else {
        if let Some(allow) = AccessPolicy::allowed_methods(&path) {
            tracing::debug!(method = %request.method(), path = %path, "Method not allowed");
            return Ok(method_not_allowed(&allow));
        }
        tracing::warn!(method = %request.method(), path = %path, "No access rule for protected route");
        return Err(ApiError::forbidden("Access denied"));
    };

    if !authorize(user.roles.as_slice(), required) {
        tracing::info!(user = %user.email, method = %request.method(), path = %path, "Insufficient roles");
        return Err(ApiError::forbidden("Insufficient roles"));
    }

    Ok(next.run(request).await)
}

fn method_not_allowed(allow: &str) -> Response {
    let mut response = ApiError::method_not_allowed("Method not allowed").into_response();
    if let Ok(value) = HeaderValue::from_str(allow) {
        response.headers_mut().insert(header::ALLOW, value);
    }
    response
}
