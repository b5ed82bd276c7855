mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

const AUCKLAND: &str = "f7248fc3-2585-4efb-8d1d-1c555f4087f6";
const EASY: &str = "54466f17-02af-48e7-8ed3-5a4a8bfacf6f";
const HARD: &str = "f808ddcd-b5e5-4d80-b732-1ca523e48434";

async fn create_walk(server: &common::TestServer, token: &str, body: Value) -> Result<reqwest::Response> {
    Ok(reqwest::Client::new()
        .post(server.url("/api/walks"))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?)
}

fn walk(name: &str, length: f64, region: &str, difficulty: &str) -> Value {
    json!({
        "name": name,
        "description": "A walk used by the integration tests",
        "lengthInKm": length,
        "regionId": region,
        "difficultyId": difficulty,
    })
}

#[tokio::test]
async fn created_walk_embeds_region_and_difficulty() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::writer_token(server).await?;

    let res = create_walk(server, &token, walk("Embedded Walk", 3.5, AUCKLAND, EASY)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["lengthInKm"], 3.5);
    assert_eq!(body["region"]["code"], "AKL");
    assert_eq!(body["difficulty"]["name"], "Easy");

    let id = body["id"].as_str().unwrap_or_default();
    let res = reqwest::Client::new()
        .get(server.url(&format!("/api/walks/{}", id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["region"]["name"], "Auckland");
    Ok(())
}

#[tokio::test]
async fn sorts_by_length_numerically() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::writer_token(server).await?;
    let tag = format!("Len{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);

    for length in [12.0, 2.5, 7.0] {
        let res = create_walk(server, &token, walk(&format!("{} {}", tag, length), length, AUCKLAND, HARD)).await?;
        assert_eq!(res.status(), StatusCode::OK);
    }

    let res = reqwest::Client::new()
        .get(server.url("/api/walks"))
        .query(&[("filterOn", "Name"), ("filterQuery", tag.as_str()), ("sortBy", "LengthInKm")])
        .bearer_auth(&token)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(common::header_u64(&res, "X-Total-Count"), Some(3));
    let body: Vec<Value> = res.json().await?;
    let lengths: Vec<f64> = body.iter().filter_map(|w| w["lengthInKm"].as_f64()).collect();
    assert_eq!(lengths, vec![2.5, 7.0, 12.0]);
    Ok(())
}

#[tokio::test]
async fn rejects_out_of_range_length_and_unknown_references() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::writer_token(server).await?;

    let res = create_walk(server, &token, walk("Too Long", 51.0, AUCKLAND, EASY)).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["field_errors"]["lengthInKm"].is_array());

    let missing = uuid::Uuid::new_v4().to_string();
    let res = create_walk(server, &token, walk("Nowhere", 1.0, &missing, EASY)).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert!(body["field_errors"]["regionId"].is_array());
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::writer_token(server).await?;

    let res = reqwest::Client::new()
        .post(server.url("/api/walks"))
        .bearer_auth(&token)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{ not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn update_and_delete_walk() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::writer_token(server).await?;
    let client = reqwest::Client::new();

    let created: Value = create_walk(server, &token, walk("Before", 1.0, AUCKLAND, EASY)).await?.json().await?;
    let path = format!("/api/walks/{}", created["id"].as_str().unwrap_or_default());

    let res = client
        .put(server.url(&path))
        .bearer_auth(&token)
        .json(&walk("After", 4.0, AUCKLAND, HARD))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["name"], "After");
    assert_eq!(updated["difficulty"]["name"], "Hard");

    let res = client.delete(server.url(&path)).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client.delete(server.url(&path)).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn deleting_a_region_removes_its_walks() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::writer_token(server).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/regions"))
        .bearer_auth(&token)
        .json(&json!({ "code": "DEL", "name": "Doomed Region" }))
        .send()
        .await?;
    let region: Value = res.json().await?;
    let region_id = region["id"].as_str().unwrap_or_default().to_string();

    let walk_body: Value = create_walk(server, &token, walk("Doomed Walk", 2.0, &region_id, EASY)).await?.json().await?;
    let walk_path = format!("/api/walks/{}", walk_body["id"].as_str().unwrap_or_default());

    let res = client
        .delete(server.url(&format!("/api/regions/{}", region_id)))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client.get(server.url(&walk_path)).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn lists_difficulties() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::reader_token(server).await?;

    let res = reqwest::Client::new()
        .get(server.url("/api/difficulties?sortBy=Name"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Vec<Value> = res.json().await?;
    let names: Vec<&str> = body.iter().filter_map(|d| d["name"].as_str()).collect();
    assert_eq!(names, vec!["Easy", "Hard", "Medium"]);
    Ok(())
}
