//! HTTP API tests driven through the router without binding a socket.

#![cfg(feature = "http-api")]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use senti_runtime::api::HttpApiServer;
use senti_runtime::config::ServerConfig;
use senti_runtime::SentimentClassifier;

fn test_router() -> Router {
    let config = ServerConfig {
        static_dir: None,
        ..ServerConfig::default()
    };
    HttpApiServer::new(config, SentimentClassifier::default()).create_router()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = test_router().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

async fn send_json(request: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send(request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_analyze_single_text() {
    let (status, body) =
        send_json(post_json("/analyze", r#"{"text": "I love this, it is great"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "text": "I love this, it is great", "sentiment": "positive", "score": 0.8 })
    );
}

#[tokio::test]
async fn test_analyze_requires_text() {
    for payload in [r#"{"text": ""}"#, r#"{}"#, r#"{"text": null}"#] {
        let (status, body) = send_json(post_json("/analyze", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "TEXT_REQUIRED");
        assert_eq!(body["error"], "Text field required");
    }
}

#[tokio::test]
async fn test_whitespace_text_is_classified() {
    let (status, body) = send_json(post_json("/analyze", r#"{"text": "   "}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sentiment"], "neutral");
}

#[tokio::test]
async fn test_invalid_json_is_rejected() {
    let (status, body) = send_json(post_json("/analyze", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_JSON");
}

#[tokio::test]
async fn test_batch_analysis() {
    let (status, body) = send_json(post_json(
        "/analyze/batch",
        r#"{"texts": ["I love this", "This is awful", "Meeting at noon"]}"#,
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    let sentiments: Vec<_> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["sentiment"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(sentiments, vec!["positive", "negative", "neutral"]);
    assert_eq!(
        body["summary"],
        json!({ "total": 3, "positive": 1, "negative": 1, "neutral": 1 })
    );
}

#[tokio::test]
async fn test_batch_limits() {
    let (status, body) = send_json(post_json("/analyze/batch", r#"{"texts": []}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "EMPTY_BATCH");

    let (status, body) = send_json(post_json("/analyze/batch", r#"{}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "EMPTY_BATCH");

    let texts = vec!["text"; 51];
    let payload = json!({ "texts": texts }).to_string();
    let (status, body) = send_json(post_json("/analyze/batch", &payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BATCH_TOO_LARGE");
    assert_eq!(body["details"], json!({ "len": 51, "max": 50 }));
}

#[tokio::test]
async fn test_export_csv() {
    let (status, headers, body) = send(post_json(
        "/export?format=csv",
        r#"{"texts": ["I love this", "Say \"hi\", then leave"]}"#,
    ))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=sentiment_analysis.csv"
    );
    assert_eq!(
        String::from_utf8(body).unwrap(),
        "Text,Sentiment,Score\n\
         \"I love this\",positive,0.80\n\
         \"Say \"\"hi\"\", then leave\",neutral,0.80\n"
    );
}

#[tokio::test]
async fn test_export_defaults_to_json() {
    for uri in ["/export", "/export?format=json", "/export?format=xml"] {
        let (status, headers, body) =
            send(post_json(uri, r#"{"texts": ["This is terrible"]}"#)).await;

        assert_eq!(status, StatusCode::OK, "uri: {}", uri);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=sentiment_analysis.json"
        );
        let parsed: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            parsed,
            json!([{ "text": "This is terrible", "sentiment": "negative", "score": 0.8 }])
        );
    }
}

#[tokio::test]
async fn test_export_rejects_empty_batch() {
    let (status, body) = send_json(post_json("/export?format=csv", r#"{"texts": []}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "EMPTY_BATCH");
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send_json(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["features"], "single-analysis,batch-analysis,data-export");
    assert!(body["ai_provider"].is_null());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_cors_headers_present() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/analyze")
        .header(header::ORIGIN, "https://example.com")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"text": "good"}"#))
        .unwrap();
    let (status, headers, _) = send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_static_files_served_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>senti</h1>").unwrap();

    let config = ServerConfig {
        static_dir: Some(dir.path().to_path_buf()),
        ..ServerConfig::default()
    };
    let router = HttpApiServer::new(config, SentimentClassifier::default()).create_router();

    let request = Request::builder()
        .uri("/index.html")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"<h1>senti</h1>");
}

#[tokio::test]
async fn test_server_serves_on_listener_until_shutdown() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let server = HttpApiServer::new(
        ServerConfig {
            static_dir: None,
            ..ServerConfig::default()
        },
        SentimentClassifier::default(),
    );
    let handle = tokio::spawn(async move {
        server
            .serve(listener, async {
                rx.await.ok();
            })
            .await
    });

    let response = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);

    tx.send(()).unwrap();
    handle.await.unwrap().unwrap();
}
