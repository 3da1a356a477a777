//! Router-level tests: validation, sessions, rendering. No network needed:
//! text generation is scripted and the image endpoint is unreachable.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ai_llm_service::service_profiles::LlmServiceProfiles;
use ai_llm_service::{
    AiLlmError, LlmProvider, LlmReply, ProviderError, ProviderErrorKind, TextGenerator,
};
use api::{AppState, SESSION_COOKIE, router};
use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, StatusCode, header};
use serde_json::Value;
use services::{ImageFetcher, UnsplashConfig};
use tower::ServiceExt;
use tutor::{AnsweringPipeline, QUOTA_EXCEEDED_MESSAGE, SessionStore, Tutor};

/// Answers with the queued results, then with a fixed default.
struct Scripted {
    queue: Mutex<VecDeque<Result<&'static str, ProviderErrorKind>>>,
}

#[async_trait]
impl TextGenerator for Scripted {
    fn provider(&self) -> LlmProvider {
        LlmProvider::Gemini
    }

    fn model(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, _prompt: &str) -> Result<LlmReply, AiLlmError> {
        let next = self.queue.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok(LlmReply {
                text: text.to_string(),
            }),
            Some(Err(kind)) => Err(ProviderError::new(LlmProvider::Gemini, kind).into()),
            None => Ok(LlmReply {
                text: "Default answer.".to_string(),
            }),
        }
    }
}

fn app(script: Vec<Result<&'static str, ProviderErrorKind>>) -> Router {
    let primary: Arc<dyn TextGenerator> = Arc::new(Scripted {
        queue: Mutex::new(script.into()),
    });
    let profiles = Arc::new(
        LlmServiceProfiles::from_generators(Some(Arc::clone(&primary)), None, vec![], Some(1))
            .unwrap(),
    );
    let tutor = Tutor::new(AnsweringPipeline::from_profiles(
        &profiles,
        Duration::from_secs(2),
    ));
    let images = ImageFetcher::new(
        UnsplashConfig::new("unsplash-key")
            .with_endpoint("http://127.0.0.1:9")
            .with_timeout_secs(1),
    )
    .unwrap();

    let state = AppState::new(
        tutor,
        SessionStore::new(Duration::from_secs(600)),
        profiles,
        images,
    )
    .unwrap();
    router(Arc::new(state))
}

fn ask_request(body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut req = Request::post("/api/ask").header(header::CONTENT_TYPE, "application/json");
    if let Some(c) = cookie {
        req = req.header(header::COOKIE, c);
    }
    req.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut req = Request::get(uri);
    if let Some(c) = cookie {
        req = req.header(header::COOKIE, c);
    }
    req.body(Body::empty()).unwrap()
}

fn session_cookie(resp: &Response<Body>) -> String {
    let raw = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie issued")
        .to_str()
        .unwrap();
    let pair = raw.split(';').next().unwrap().trim().to_string();
    assert!(pair.starts_with(&format!("{SESSION_COOKIE}=")));
    pair
}

async fn json_body(resp: Response<Body>) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn ask_answers_and_transcript_follows_cookie() {
    let app = app(vec![Ok("Overfitting is...")]);

    let resp = app
        .clone()
        .oneshot(ask_request(
            r#"{"question":"What is overfitting?","profile":"👶 Beginner"}"#,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp);

    let body = json_body(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["question"], "What is overfitting?");
    assert_eq!(body["data"]["answer"], "Overfitting is...");
    assert_eq!(body["data"]["turn_index"], 0);
    assert_eq!(body["data"]["provider_state"], "primary");

    let resp = app
        .clone()
        .oneshot(get("/api/transcript", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
    let body = json_body(resp).await;
    assert_eq!(body["data"]["turns"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["profile"], "Beginner");

    // A different (cookie-less) caller sees an empty transcript.
    let resp = app.oneshot(get("/api/transcript", None)).await.unwrap();
    let body = json_body(resp).await;
    assert!(body["data"]["turns"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn blank_question_is_rejected_and_transcript_untouched() {
    let app = app(vec![Ok("Mean is the average.")]);

    let resp = app
        .clone()
        .oneshot(ask_request(r#"{"question":"What is a mean?"}"#, None))
        .await
        .unwrap();
    let cookie = session_cookie(&resp);

    let resp = app
        .clone()
        .oneshot(ask_request(r#"{"question":"   "}"#, Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["error"]["details"][0]["path"], "question");

    let resp = app
        .oneshot(get("/api/transcript", Some(&cookie)))
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert_eq!(body["data"]["turns"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_profile_and_malformed_json_get_envelopes() {
    let app = app(vec![]);

    let resp = app
        .clone()
        .oneshot(ask_request(r#"{"question":"q","profile":"Guru"}"#, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["error"]["details"][0]["path"], "profile");

    let resp = app
        .oneshot(ask_request(r#"{"profile":"Beginner"}"#, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let body = json_body(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    assert_eq!(body["error"]["details"][0]["path"], "question");
}

#[tokio::test]
async fn quota_exhaustion_is_reported_in_answer_and_state() {
    let app = app(vec![Err(ProviderErrorKind::Api {
        code: 429,
        status: "RESOURCE_EXHAUSTED".into(),
        message: "Quota exceeded".into(),
    })]);

    let resp = app
        .oneshot(ask_request(r#"{"question":"What is SQL?"}"#, None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["data"]["answer"], QUOTA_EXCEEDED_MESSAGE);
    assert_eq!(body["data"]["provider_state"], "unavailable");
}

#[tokio::test]
async fn chat_page_renders_escaped_transcript() {
    let app = app(vec![Ok("Use <b>bold</b> & stay calm.")]);

    let form = Request::post("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "question=%3Cscript%3Ealert(1)%3C%2Fscript%3E&profile=Advanced",
        ))
        .unwrap();
    let resp = app.clone().oneshot(form).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
    let cookie = session_cookie(&resp);

    let resp = app.oneshot(get("/", Some(&cookie))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = text_body(resp).await;

    assert!(html.contains("DataSage 🧠"));
    assert!(html.contains("Your AI Data Science Tutor"));
    assert!(html.contains("💬 Conversation"));
    assert!(html.contains("&lt;script&gt;alert(1)"));
    assert!(!html.contains("<script>alert(1)"));
    assert!(html.contains("&lt;b&gt;bold"));
    assert!(!html.contains("<b>bold</b>"));
    assert!(html.contains("&amp; stay calm."));
    assert!(html.contains(r#"<option value="Advanced" selected>"#));
    assert!(!html.contains("Ask your first Data Science question"));
    assert!(!html.contains("<img"));
}

#[tokio::test]
async fn empty_page_shows_hint_and_blank_form_only_redirects() {
    let app = app(vec![]);

    let resp = app.clone().oneshot(get("/", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp);
    let html = text_body(resp).await;
    assert!(html.contains("👋 Ask your first Data Science question!"));
    assert!(html.contains(r#"<option value="Intermediate" selected>"#));
    assert!(html.contains("🧠 Powered by Gemini • 🖼️ Unsplash"));

    let form = Request::post("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::COOKIE, &cookie)
        .body(Body::from("question=+++&profile=Beginner"))
        .unwrap();
    let resp = app.clone().oneshot(form).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = app
        .clone()
        .oneshot(get("/api/transcript", Some(&cookie)))
        .await
        .unwrap();
    let body = json_body(resp).await;
    assert!(body["data"]["turns"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["profile"], "Beginner");

    let resp = app.oneshot(get("/", Some(&cookie))).await.unwrap();
    let html = text_body(resp).await;
    assert!(html.contains(r#"<option value="Beginner" selected>"#));
}

#[tokio::test]
async fn image_and_health_degrade_gracefully() {
    let app = app(vec![]);

    let resp = app.clone().oneshot(get("/api/image", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert!(body["data"]["url"].is_null());

    let resp = app.clone().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["success"], true);
    assert!(body["data"].as_array().unwrap().is_empty());

    let resp = app.oneshot(get("/nope", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
