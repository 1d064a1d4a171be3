use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "needs a running Postgres, see TEST_DATABASE_URL"]
async fn count_on_empty_table_is_zero() -> Result<()> {
    let app = TestApp::spawn().await?;

    for path in ["/count", "/api/count"] {
        let res = app.http_client.get(app.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.json::<Value>().await?, json!({ "count": 0 }));
    }

    Ok(())
}

#[tokio::test]
#[ignore = "needs a running Postgres, see TEST_DATABASE_URL"]
async fn count_routes_agree_with_the_table() -> Result<()> {
    let app = TestApp::spawn().await?;

    for email in ["one@example.com", "two@example.com", "three@example.com"] {
        app.post_signup(&json!({ "email": email }))
            .await?
            .error_for_status()?;
    }

    let alias: Value = app
        .http_client
        .get(app.url("/api/count"))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(app.get_count().await?, 3);
    assert_eq!(alias, json!({ "count": 3 }));
    assert_eq!(app.stored_rows().await?, 3);

    Ok(())
}
