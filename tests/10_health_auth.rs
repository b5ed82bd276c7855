mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::get(server.url("/health")).await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn register_then_login_returns_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let username = common::unique_username("reader");

    let res = common::register(server, &username, &["Reader"]).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "User was registered! Please login.");

    let res = common::login(server, &username, common::PASSWORD).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    let token = body["jwtToken"].as_str().unwrap_or_default();
    assert_eq!(token.split('.').count(), 3);
    Ok(())
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let username = common::unique_username("wrongpw");
    common::register(server, &username, &["Reader"]).await?;

    for (user, password) in [(username.as_str(), "not-the-password"), ("nobody@example.com", common::PASSWORD)] {
        let res = common::login(server, user, password).await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = res.json().await?;
        assert_eq!(body["message"], "Username or password incorrect");
    }
    Ok(())
}

#[tokio::test]
async fn duplicate_registration_fails() -> Result<()> {
    let server = common::ensure_server().await?;
    let username = common::unique_username("dupe");

    assert_eq!(common::register(server, &username, &["Reader"]).await?.status(), StatusCode::OK);
    let res = common::register(server, &username.to_uppercase(), &["Reader"]).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["message"].as_str().unwrap_or_default().contains("is already taken"));
    Ok(())
}

#[tokio::test]
async fn registration_errors_are_joined() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::Client::new()
        .post(server.url("/api/auth/register"))
        .json(&serde_json::json!({ "username": common::unique_username("bad"), "password": "x", "roles": ["Admin"] }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.contains("Passwords must be at least 6 characters."));
    assert!(message.contains(", Role Admin does not exist."));
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_a_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/api/regions")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client.get(server.url("/api/regions")).bearer_auth("not.a.token").send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn readers_cannot_write() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::reader_token(server).await?;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/api/regions")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(server.url("/api/regions"))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "code": "RDR", "name": "Reader Region" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn users_without_roles_are_forbidden() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::token_with_roles(server, &[]).await?;

    let res = reqwest::Client::new()
        .get(server.url("/api/difficulties"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}
