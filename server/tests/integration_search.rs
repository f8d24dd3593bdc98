use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use search_core::{Document, SearchEngine};
use search_server::{build_app, AppConfig};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn tiny_app(config: AppConfig) -> Router {
    let engine = SearchEngine::build(vec![
        Document::new(1, "Red Shoes", "Footwear"),
        Document::new(2, "Blue Shoes", "Footwear"),
        Document::new(3, "Red Book", "Books"),
    ])
    .unwrap();
    build_app(Arc::new(engine), config)
}

async fn call(app: Router, uri: &str) -> (StatusCode, Bytes) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

fn ids(body: &Bytes) -> Vec<u64> {
    let json: Value = serde_json::from_slice(body).unwrap();
    json.as_array().unwrap().iter().map(|d| d["id"].as_u64().unwrap()).collect()
}

#[tokio::test]
async fn search_returns_ranked_records() {
    let (status, body) = call(tiny_app(AppConfig::default()), "/search?q=shoes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2]);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json[0], serde_json::json!({ "id": 1, "name": "Red Shoes", "category": "Footwear" }));
}

#[tokio::test]
async fn search_scenario() {
    let (_, body) = call(tiny_app(AppConfig::default()), "/search?q=red").await;
    assert_eq!(ids(&body), vec![1, 3]);

    let (status, body) = call(tiny_app(AppConfig::default()), "/search?q=nonexistentterm").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"[]");
}

#[tokio::test]
async fn missing_or_blank_query_is_bad_request() {
    for uri in ["/search", "/search?q=", "/search?q=%20%20"] {
        let (status, _) = call(tiny_app(AppConfig::default()), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn pagination_parameters() {
    let (_, body) = call(tiny_app(AppConfig::default()), "/search?q=red%20footwear&limit=2&offset=1").await;
    assert_eq!(ids(&body), vec![2, 3]);

    for uri in ["/search?q=red&limit=0", "/search?q=red&offset=-1", "/search?q=red&limit=abc"] {
        let (status, _) = call(tiny_app(AppConfig::default()), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn page_size_defaults_and_clamps() {
    let config = AppConfig { page_size: 1, max_page_size: 2 };
    let (_, body) = call(tiny_app(config), "/search?q=red%20footwear").await;
    assert_eq!(ids(&body), vec![1]);

    let (_, body) = call(tiny_app(config), "/search?q=red%20footwear&limit=100").await;
    assert_eq!(ids(&body), vec![1, 2]);
}

#[tokio::test]
async fn zero_page_config_does_not_reject_valid_requests() {
    let config = AppConfig { page_size: 50, max_page_size: 0 };
    let (status, body) = call(tiny_app(config), "/search?q=red&limit=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1]);

    let config = AppConfig { page_size: 0, max_page_size: 10 };
    let (status, body) = call(tiny_app(config), "/search?q=red").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1]);
}

#[tokio::test]
async fn doc_lookup() {
    let (status, body) = call(tiny_app(AppConfig::default()), "/doc/3").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["name"], "Red Book");

    let (status, _) = call(tiny_app(AppConfig::default()), "/doc/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn concurrent_requests_share_one_engine() {
    let app = tiny_app(AppConfig::default());
    let mut handles = Vec::new();
    for i in 0..32 {
        let app = app.clone();
        let q = if i % 2 == 0 { "shoes" } else { "red" };
        handles.push(tokio::spawn(async move { (q, call(app, &format!("/search?q={q}")).await) }));
    }
    for h in handles {
        let (q, (status, body)) = h.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        let want = if q == "shoes" { vec![1, 2] } else { vec![1, 3] };
        assert_eq!(ids(&body), want);
    }
}
