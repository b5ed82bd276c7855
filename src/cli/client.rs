use chrono::Utc;
use reqwest::header::HeaderMap;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::session::Session;
use crate::api::dto::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use crate::query::PageMeta;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Not logged in. Run `walks auth login` first")]
    NotLoggedIn,

    #[error("Session expired at {0}. Run `walks auth login` again")]
    SessionExpired(chrono::DateTime<Utc>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// List parameters sent on the query string.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub sort_by: Option<String>,
    pub ascending: Option<bool>,
    pub filter_on: Option<String>,
    pub filter_query: Option<String>,
    pub page_number: Option<u64>,
    pub page_size: Option<u64>,
}

impl ListOptions {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(v) = &self.sort_by {
            pairs.push(("sortBy", v.clone()));
        }
        if let Some(v) = self.ascending {
            pairs.push(("isAscending", v.to_string()));
        }
        if let Some(v) = &self.filter_on {
            pairs.push(("filterOn", v.clone()));
        }
        if let Some(v) = &self.filter_query {
            pairs.push(("filterQuery", v.clone()));
        }
        if let Some(v) = self.page_number {
            pairs.push(("pageNumber", v.to_string()));
        }
        if let Some(v) = self.page_size {
            pairs.push(("pageSize", v.to_string()));
        }
        pairs
    }
}

/// One page of a list response.
#[derive(Debug, Clone)]
pub struct Listed<T> {
    pub items: Vec<T>,
    pub meta: Option<PageMeta>,
}

/// Read the pagination headers, if the server sent all of them.
pub fn page_meta_from_headers(headers: &HeaderMap) -> Option<PageMeta> {
    let read = |name: &str| -> Option<u64> { headers.get(name)?.to_str().ok()?.trim().parse().ok() };
    Some(PageMeta {
        total_count: read("x-total-count")?,
        page_number: read("x-page-number")?,
        page_size: read("x-page-size")?,
        total_pages: read("x-total-pages")?,
    })
}

/// HTTP client for the walks API.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Option<Session>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token, refusing to send with a missing or expired session.
    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let session = self.session.as_ref().ok_or(ClientError::NotLoggedIn)?;
        if session.is_expired(Utc::now()) {
            return Err(ClientError::SessionExpired(session.expires_at));
        }
        Ok(request.bearer_auth(&session.token))
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.http.post(self.url("/api/auth/login")).json(&body).send().await?;
        let login: LoginResponse = read_json(response).await?;
        Ok(login.jwt_token)
    }

    pub async fn register(&self, username: &str, password: &str, roles: Vec<String>) -> Result<String, ClientError> {
        let body = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            roles,
        };
        let response = self.http.post(self.url("/api/auth/register")).json(&body).send().await?;
        let message: MessageResponse = read_json(response).await?;
        Ok(message.message)
    }

    pub async fn list<T: DeserializeOwned>(&self, path: &str, options: &ListOptions) -> Result<Listed<T>, ClientError> {
        let request = self.http.get(self.url(path)).query(&options.to_pairs());
        let response = check(self.authorized(request)?.send().await?).await?;
        let meta = page_meta_from_headers(response.headers());
        let items = response.json().await?;
        Ok(Listed { items, meta })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.http.get(self.url(path));
        read_json(self.authorized(request)?.send().await?).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ClientError> {
        let request = self.http.post(self.url(path)).json(body);
        read_json(self.authorized(request)?.send().await?).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ClientError> {
        let request = self.http.put(self.url(path)).json(body);
        read_json(self.authorized(request)?.send().await?).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let request = self.http.delete(self.url(path));
        check(self.authorized(request)?.send().await?).await?;
        Ok(())
    }

    pub async fn upload_image<T: DeserializeOwned>(
        &self,
        file: &std::path::Path,
        file_name: &str,
        description: Option<&str>,
    ) -> Result<T, ClientError> {
        let bytes = tokio::fs::read(file).await?;
        let original_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let mut form = reqwest::multipart::Form::new()
            .part("File", reqwest::multipart::Part::bytes(bytes).file_name(original_name))
            .text("FileName", file_name.to_string());
        if let Some(description) = description {
            form = form.text("FileDescription", description.to_string());
        }

        let request = self.http.post(self.url("/api/images/upload")).multipart(form);
        read_json(self.authorized(request)?.send().await?).await
    }

    pub async fn health(&self) -> Result<Value, ClientError> {
        read_json(self.http.get(self.url("/health")).send().await?).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    Ok(check(response).await?.json().await?)
}

/// Turn non-success statuses into `ClientError`s carrying the server's message.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = error_message(&text);
    Err(match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        _ => ClientError::Api {
            status: status.as_u16(),
            message,
        },
    })
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => value
            .get("message")
            .or_else(|| value.get("errorMessage"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        Err(_) => body.to_string(),
    }
}
