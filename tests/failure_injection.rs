//! Failure handling: unreachable upstreams, bad targets, bad payloads.

mod common;

use common::{client, start_mock_backend, start_programmable_backend, start_proxy, unused_addr, MockReply};
use serde_json::Value;

#[tokio::test]
async fn test_unreachable_upstream_is_400() {
    let dead = unused_addr().await;
    let (proxy, _shutdown) = start_proxy(None).await;

    let response = client()
        .get(format!("http://{}/proxy/http://{}/", proxy, dead))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    assert_eq!(response.headers()["content-type"], "application/json");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Upstream request failed.");
    assert!(!body["details"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_default_target_on_web_path() {
    let dead = unused_addr().await;
    let (proxy, _shutdown) = start_proxy(Some(format!("http://{}", dead))).await;

    let response = client()
        .get(format!("http://{}/web/r/rust", proxy))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Path proxy request failed.");
    assert!(!body["details"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_api_repeated_target_is_400() {
    let (default_site, log) = start_programmable_backend(|_| {
        MockReply::new(200)
            .header("Content-Type", "application/json")
            .body(r#"{"data":{"children":[{"data":{"id":"from-default"}}]}}"#)
    })
    .await;
    let (proxy, _shutdown) = start_proxy(Some(format!("http://{}", default_site))).await;

    let response = client()
        .get(format!("http://{}/api/reddit", proxy))
        .query(&[("target", "http://a.example/r/a"), ("target", "http://b.example/r/b")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid or unreachable target URL.");
    assert!(body["details"].as_str().unwrap().contains("target"));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_http_scheme_is_rejected() {
    let (proxy, _shutdown) = start_proxy(None).await;

    for target in ["ftp://files.example.com/pub", "file:///etc/passwd"] {
        let response = client()
            .get(format!("http://{}/proxy/{}", proxy, target))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 400, "target {target}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Invalid or unreachable target URL.");
    }
}

#[tokio::test]
async fn test_api_with_unreachable_target() {
    let dead = unused_addr().await;
    let (proxy, _shutdown) = start_proxy(None).await;

    let response = client()
        .get(format!("http://{}/api/reddit", proxy))
        .query(&[("target", format!("http://{}/r/rust", dead))])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Unable to build view.");
}

#[tokio::test]
async fn test_api_upstream_error_status_is_400() {
    let backend = start_mock_backend(
        MockReply::new(500)
            .header("Content-Type", "application/json")
            .body("{}"),
    )
    .await;
    let (proxy, _shutdown) = start_proxy(None).await;

    let response = client()
        .get(format!("http://{}/api/reddit", proxy))
        .query(&[("target", format!("http://{}/r/rust", backend))])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Unable to build view.");
}

#[tokio::test]
async fn test_api_wrong_shape_is_400() {
    let backend = start_mock_backend(
        MockReply::new(200)
            .header("Content-Type", "application/json")
            .body(r#"{"kind":"Listing","data":{}}"#),
    )
    .await;
    let (proxy, _shutdown) = start_proxy(None).await;

    let response = client()
        .get(format!("http://{}/api/reddit", proxy))
        .query(&[("target", format!("http://{}/r/rust", backend))])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_proxy_keeps_serving_after_failures() {
    let dead = unused_addr().await;
    let (proxy, _shutdown) = start_proxy(None).await;
    let client = client();

    for _ in 0..5 {
        let response = client
            .get(format!("http://{}/proxy/http://{}/", proxy, dead))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
    }

    let health = client.get(format!("http://{}/healthz", proxy)).send().await.unwrap();
    assert_eq!(health.status(), 200);
}
