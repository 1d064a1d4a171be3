//! The probes and the origin gate, none of these need a database.

use anyhow::Result;
use reqwest::{header, StatusCode};
use serde_json::{json, Value};

use crate::helpers::TestApp;

#[tokio::test]
async fn root_returns_plain_ok() -> Result<()> {
    let app = TestApp::spawn_without_store(&[]).await?;

    let res = app.http_client.get(app.url("/")).send().await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "OK");

    Ok(())
}

#[tokio::test]
async fn healthcheck_ok() -> Result<()> {
    let app = TestApp::spawn_without_store(&[]).await?;

    let res = app.http_client.get(app.url("/health")).send().await?;

    assert!(res.status() == StatusCode::OK, "Healthcheck FAILED!");
    assert_eq!(res.json::<Value>().await?, json!({ "ok": true }));

    Ok(())
}

#[tokio::test]
async fn invalid_path_404() -> Result<()> {
    let app = TestApp::spawn_without_store(&[]).await?;

    let res = app.http_client.get(app.url("/invalidpath")).send().await?;

    assert!(
        res.status() == StatusCode::NOT_FOUND,
        "Invalid Path check FAILED!, expected: {}, got: {}",
        404,
        res.status().as_u16()
    );

    Ok(())
}

#[tokio::test]
async fn count_returns_500_when_the_store_is_down() -> Result<()> {
    let app = TestApp::spawn_without_store(&[]).await?;

    for path in ["/count", "/api/count"] {
        let res = app.http_client.get(app.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.json::<Value>().await?, json!({ "error": "count_failed" }));
    }

    Ok(())
}

#[tokio::test]
async fn origin_gate_blocks_unknown_origins_only() -> Result<()> {
    let app = TestApp::spawn_without_store(&["https://app.example"]).await?;

    let blocked = app
        .http_client
        .get(app.url("/health"))
        .header(header::ORIGIN, "https://evil.example")
        .send()
        .await?;
    assert_eq!(blocked.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        blocked.json::<Value>().await?,
        json!({ "error": "origin_not_allowed" })
    );

    let allowed = app
        .http_client
        .get(app.url("/health"))
        .header(header::ORIGIN, "https://app.example")
        .send()
        .await?;
    assert_eq!(allowed.status(), StatusCode::OK);
    assert_eq!(
        allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://app.example"
    );

    let no_origin = app.http_client.get(app.url("/health")).send().await?;
    assert_eq!(no_origin.status(), StatusCode::OK);

    Ok(())
}
