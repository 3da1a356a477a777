use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use services::unsplash::DEFAULT_QUERIES;
use services::{ImageFetcher, UnsplashConfig};

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: Value,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

async fn random_photo(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    state.queries.lock().unwrap().push(params);
    (state.status, Json(state.body.clone()))
}

async fn spawn_unsplash(
    status: StatusCode,
    body: Value,
) -> (String, Arc<Mutex<Vec<HashMap<String, String>>>>) {
    let queries = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status,
        body,
        queries: Arc::clone(&queries),
    };
    let app = Router::new()
        .route("/photos/random", get(random_photo))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), queries)
}

fn fetcher(endpoint: &str) -> ImageFetcher {
    ImageFetcher::new(
        UnsplashConfig::new("unsplash-key")
            .with_endpoint(endpoint)
            .with_timeout_secs(2),
    )
    .unwrap()
}

#[tokio::test]
async fn returns_regular_url_and_sends_query_and_key() {
    let (endpoint, queries) = spawn_unsplash(
        StatusCode::OK,
        json!({ "id": "abc", "urls": { "regular": "https://images.example/robot.jpg", "small": "x" } }),
    )
    .await;

    let url = fetcher(&endpoint).fetch_decorative_image().await;
    assert_eq!(url, "https://images.example/robot.jpg");

    let queries = queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0]["client_id"], "unsplash-key");
    assert!(DEFAULT_QUERIES.contains(&queries[0]["query"].as_str()));
}

#[tokio::test]
async fn non_success_status_yields_empty_string() {
    let (endpoint, _) = spawn_unsplash(
        StatusCode::FORBIDDEN,
        json!({ "errors": ["Rate Limit Exceeded"] }),
    )
    .await;
    assert_eq!(fetcher(&endpoint).fetch_decorative_image().await, "");
}

#[tokio::test]
async fn missing_field_yields_empty_string() {
    let (endpoint, _) = spawn_unsplash(StatusCode::OK, json!({ "urls": {} })).await;
    assert_eq!(fetcher(&endpoint).fetch_decorative_image().await, "");

    let (endpoint, _) = spawn_unsplash(StatusCode::OK, json!(["not", "an", "object"])).await;
    assert_eq!(fetcher(&endpoint).fetch_decorative_image().await, "");
}

#[tokio::test]
async fn unreachable_endpoint_yields_empty_string() {
    assert_eq!(fetcher("http://127.0.0.1:9").fetch_decorative_image().await, "");
}

#[tokio::test]
async fn slow_endpoint_times_out_to_empty_string() {
    async fn stalled() -> Json<Value> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Json(json!({ "urls": { "regular": "https://images.example/late.jpg" } }))
    }

    let app = Router::new().route("/photos/random", get(stalled));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let fetcher = ImageFetcher::new(
        UnsplashConfig::new("unsplash-key")
            .with_endpoint(format!("http://{addr}"))
            .with_timeout_secs(1),
    )
    .unwrap();

    let started = Instant::now();
    assert_eq!(fetcher.fetch_decorative_image().await, "");
    assert!(started.elapsed() < Duration::from_secs(10));
}
