//! Fixed endpoints served without contacting any upstream.

mod common;

use common::{client, start_proxy};
use reqwest::Method;
use serde_json::{json, Value};

#[tokio::test]
async fn test_healthz() {
    let (proxy, _shutdown) = start_proxy(None).await;

    let response = client().get(format!("http://{}/healthz?probe=1", proxy)).send().await.unwrap();

    assert_eq!(response.status(), 200);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.json::<Value>().await.unwrap(), json!({ "ok": true }));
}

#[tokio::test]
async fn test_preflight_on_any_path() {
    let (proxy, _shutdown) = start_proxy(None).await;

    for path in ["/proxy/https://old.reddit.com/", "/api/reddit", "/anything/else"] {
        let response = client()
            .request(Method::OPTIONS, format!("http://{}{}", proxy, path))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 204, "path {path}");
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "GET,POST,OPTIONS");
        assert_eq!(headers["access-control-allow-headers"], "content-type");
    }
}

#[tokio::test]
async fn test_telemetry_sink_discards_body() {
    let (proxy, _shutdown) = start_proxy(None).await;

    let response = client()
        .post(format!("http://{}/web/log/error.json", proxy))
        .header("Content-Type", "application/json")
        .body(r#"{"level":"error","message":"boom"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 204);
    assert!(response.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let (proxy, _shutdown) = start_proxy(None).await;

    for path in ["/", "/favicon.ico", "/webx"] {
        let response = client().get(format!("http://{}{}", proxy, path)).send().await.unwrap();

        assert_eq!(response.status(), 404, "path {path}");
        assert_eq!(response.json::<Value>().await.unwrap(), json!({ "error": "Not found" }));
    }
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let (proxy, _shutdown) = start_proxy(None).await;

    let response = client()
        .get(format!("http://{}/healthz", proxy))
        .header("x-request-id", "caller-supplied-id")
        .send()
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "caller-supplied-id");
}

#[tokio::test]
async fn test_shutdown_stops_accepting() {
    let (proxy, shutdown) = start_proxy(None).await;
    let client = client();

    assert_eq!(client.get(format!("http://{}/healthz", proxy)).send().await.unwrap().status(), 200);

    shutdown.trigger();
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    assert!(client.get(format!("http://{}/healthz", proxy)).send().await.is_err());
}
