mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn unknown_routes_answer_not_found() -> Result<()> {
    let server = common::start_server(100).await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/missing", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        res.headers().get("content-type").map(|v| v.to_str().unwrap()),
        Some("application/json")
    );
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );
    assert_eq!(res.text().await?, "\"Not Found\"");

    // Supported path, unsupported method
    let res = client
        .put(format!("{}/product", server.base_url))
        .body("{}")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, "\"Not Found\"");

    Ok(())
}

#[tokio::test]
async fn matched_routes_with_failed_extraction_answer_not_found() -> Result<()> {
    let server = common::start_server(100).await?;
    let client = reqwest::Client::new();

    // GET /product without the productId query parameter
    let res = client
        .get(format!("{}/product", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, "\"Not Found\"");

    // POST /product with a body that is not JSON
    let res = client
        .post(format!("{}/product", server.base_url))
        .body("not json at all")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await?, "\"Not Found\"");

    // PATCH /product missing updateValue
    let res = client
        .patch(format!("{}/product", server.base_url))
        .json(&serde_json::json!({ "productId": "A", "updateKey": "price" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}
