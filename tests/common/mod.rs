#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub const PASSWORD: &str = "Passw0rd!";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub images_dir: PathBuf,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);
        let images_dir = std::env::temp_dir().join(format!("walks-api-images-{}", port));

        // In-memory backend so tests need no database
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_walks-api"));
        cmd.env("APP_ENV", "development")
            .env("STORAGE_BACKEND", "memory")
            .env("DATABASE_SEED_DATA", "true")
            .env("WALKS_API_PORT", port.to_string())
            .env("JWT_SECRET", "integration-test-secret-with-enough-length")
            .env("IMAGES_STORAGE_DIR", &images_dir)
            .env_remove("API_PUBLIC_BASE_URL")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, images_dir, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(15)).await?;
    Ok(server)
}

/// A username nobody else in the run will pick.
pub fn unique_username(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, uuid::Uuid::new_v4().simple())
}

pub async fn register(server: &TestServer, username: &str, roles: &[&str]) -> Result<reqwest::Response> {
    Ok(reqwest::Client::new()
        .post(server.url("/api/auth/register"))
        .json(&json!({ "username": username, "password": PASSWORD, "roles": roles }))
        .send()
        .await?)
}

pub async fn login(server: &TestServer, username: &str, password: &str) -> Result<reqwest::Response> {
    Ok(reqwest::Client::new()
        .post(server.url("/api/auth/login"))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await?)
}

/// Register a fresh user with `roles` and return its bearer token.
pub async fn token_with_roles(server: &TestServer, roles: &[&str]) -> Result<String> {
    let username = unique_username("user");
    let res = register(server, &username, roles).await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "register failed: {}", res.status());

    let res = login(server, &username, PASSWORD).await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
    let body: Value = res.json().await?;
    body["jwtToken"]
        .as_str()
        .map(str::to_string)
        .context("login response without jwtToken")
}

pub async fn writer_token(server: &TestServer) -> Result<String> {
    token_with_roles(server, &["Reader", "Writer"]).await
}

pub async fn reader_token(server: &TestServer) -> Result<String> {
    token_with_roles(server, &["Reader"]).await
}

pub fn header_u64(res: &reqwest::Response, name: &str) -> Option<u64> {
    res.headers().get(name)?.to_str().ok()?.parse().ok()
}
