mod common;

use anyhow::Result;
use reqwest::multipart::{Form, Part};
use reqwest::{header, StatusCode};
use serde_json::Value;

// 1x1 transparent PNG
const PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, 0x00, 0x00,
    0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00,
    0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D,
    0xB4, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

fn form(bytes: Vec<u8>, original_name: &str, file_name: &str) -> Form {
    Form::new()
        .part("File", Part::bytes(bytes).file_name(original_name.to_string()))
        .text("FileName", file_name.to_string())
        .text("FileDescription", "uploaded by tests")
}

async fn upload(server: &common::TestServer, token: &str, form: Form) -> Result<reqwest::Response> {
    Ok(reqwest::Client::new()
        .post(server.url("/api/images/upload"))
        .bearer_auth(token)
        .multipart(form)
        .send()
        .await?)
}

#[tokio::test]
async fn uploads_and_serves_an_image() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::writer_token(server).await?;
    let name = format!("pixel-{}", uuid::Uuid::new_v4().simple());

    let res = upload(server, &token, form(PNG.to_vec(), "pixel.PNG", &name)).await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let location = res
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_default();

    let body: Value = res.json().await?;
    let expected_path = format!("{}/images/{}.PNG", server.base_url, name);
    assert_eq!(body["filePath"], expected_path.as_str());
    assert_eq!(body["fileExtension"], ".PNG");
    assert_eq!(body["fileSizeInBytes"], PNG.len() as u64);
    assert_eq!(body["fileDescription"], "uploaded by tests");
    assert_eq!(location, expected_path);

    assert!(server.images_dir.join(format!("{}.PNG", name)).exists());
    let served = reqwest::get(&expected_path).await?;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(served.bytes().await?.as_ref(), PNG);
    Ok(())
}

#[tokio::test]
async fn rejects_unsupported_extension() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::writer_token(server).await?;

    let res = upload(server, &token, form(PNG.to_vec(), "anim.gif", "anim")).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(
        body["message"],
        "Unsupported file extension. Only .jpg, .jpeg, and .png are allowed."
    );
    Ok(())
}

#[tokio::test]
async fn oversized_file_with_bad_extension_reports_both() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::writer_token(server).await?;

    let bytes = vec![0u8; 10 * 1024 * 1024 + 1];
    let res = upload(server, &token, form(bytes, "huge.bmp", "huge")).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.contains("Unsupported file extension."));
    assert!(message.contains("File size cannot exceed 10MB."));
    Ok(())
}

#[tokio::test]
async fn readers_cannot_upload() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::reader_token(server).await?;

    let res = upload(server, &token, form(PNG.to_vec(), "pixel.png", "reader-pixel")).await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}
