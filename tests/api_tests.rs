use ai_buddy_backend::message::{ChatMessage, ChatResponse, SavedPrompt, TextResponse};
use ai_buddy_backend::routes::create_router;
use ai_buddy_backend::services::assistant::Assistant;
use ai_buddy_backend::services::prompt_store::PromptStore;
use ai_buddy_backend::state::AppState;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;
use uuid::Uuid;

/// Scratch directory holding the prompt blob and the static UI; removed on drop.
struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("ai-buddy-api-{}", Uuid::new_v4()));
        std::fs::create_dir_all(dir.join("public")).unwrap();
        Self { dir }
    }

    fn router(&self) -> Router {
        let state = Arc::new(AppState::new(
            Assistant::fallback_only(),
            PromptStore::in_dir(self.dir.join("data")),
            Duration::from_secs(60),
        ));
        create_router(self.dir.join("public")).with_state(state)
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn bare(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body<T: DeserializeOwned>(response: Response) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

#[tokio::test]
async fn test_chat_endpoint_fallback() {
    let scratch = Scratch::new();
    let response = scratch
        .router()
        .oneshot(post_json("/chat", r#"{"message": "please summarize this"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let chat_resp: ChatResponse = json_body(response).await;
    assert_eq!(
        chat_resp.text,
        "Here's a concise summary:\n\n• Key point 1\n• Key point 2\n• Key point 3"
    );
    assert!(chat_resp.session_id.is_none());
}

#[tokio::test]
async fn test_chat_missing_message_is_bad_request() {
    let scratch = Scratch::new();
    let app = scratch.router();
    for body in [r#"{}"#, r#"{"message": 7}"#, r#"{"message": ""}"#] {
        let response = app.clone().oneshot(post_json("/chat", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let err: serde_json::Value = json_body(response).await;
        assert_eq!(err["error"], "message is required");
    }
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let scratch = Scratch::new();
    let response = scratch
        .router()
        .oneshot(post_json("/chat", "{not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_text_endpoint_modes() {
    let scratch = Scratch::new();
    let app = scratch.router();

    let response = app
        .clone()
        .oneshot(post_json("/text", r#"{"mode": "rephrase", "text": "one two three"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let resp: TextResponse = json_body(response).await;
    assert_eq!(resp.text, "Rephrased: three two one [polished tone]");

    // Mode defaults to summarize.
    let response = app
        .clone()
        .oneshot(post_json("/text", r#"{"text": "short note"}"#))
        .await
        .unwrap();
    let resp: TextResponse = json_body(response).await;
    assert!(resp.text.starts_with("Summary:\n• short note..."));

    let response = app
        .oneshot(post_json(
            "/api/text",
            r#"{"mode": "translate", "text": "hi", "language": "German"}"#,
        ))
        .await
        .unwrap();
    let resp: TextResponse = json_body(response).await;
    assert_eq!(resp.text, "Translated (German): hi");
}

#[tokio::test]
async fn test_text_missing_text_is_bad_request() {
    let scratch = Scratch::new();
    let response = scratch
        .router()
        .oneshot(post_json("/text", r#"{"mode": "expand"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_prompt_library_flow() {
    let scratch = Scratch::new();
    let app = scratch.router();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/prompts",
            r#"{"title": "Standup", "content": "Summarize my notes", "category": "Business"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let first: SavedPrompt = json_body(response).await;
    assert_eq!(first.category, "Business");

    let response = app
        .clone()
        .oneshot(post_json("/api/prompts", r#"{"title": "Poem", "content": "Write a haiku"}"#))
        .await
        .unwrap();
    let second: SavedPrompt = json_body(response).await;
    assert_eq!(second.category, "Writing");

    let response = app.clone().oneshot(bare("GET", "/api/prompts")).await.unwrap();
    let listed: Vec<SavedPrompt> = json_body(response).await;
    assert_eq!(listed, vec![first.clone(), second.clone()]);

    let response = app
        .clone()
        .oneshot(bare("GET", "/api/prompts?q=haiku&category=all"))
        .await
        .unwrap();
    let found: Vec<SavedPrompt> = json_body(response).await;
    assert_eq!(found, vec![second.clone()]);

    let response = app
        .clone()
        .oneshot(bare("DELETE", &format!("/api/prompts/{}", first.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(bare("DELETE", &format!("/api/prompts/{}", first.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(bare("GET", "/api/prompts")).await.unwrap();
    let listed: Vec<SavedPrompt> = json_body(response).await;
    assert_eq!(listed, vec![second]);
}

#[tokio::test]
async fn test_incomplete_prompt_is_rejected() {
    let scratch = Scratch::new();
    let response = scratch
        .router()
        .oneshot(post_json("/prompts", r#"{"title": "No body"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_session_transcript() {
    let scratch = Scratch::new();
    let app = scratch.router();

    let response = app
        .clone()
        .oneshot(post_json(
            "/chat",
            r#"{"message": "any ideas?", "session_id": "overlay-42"}"#,
        ))
        .await
        .unwrap();
    let chat_resp: ChatResponse = json_body(response).await;
    assert_eq!(chat_resp.session_id.as_deref(), Some("overlay-42"));

    let response = app
        .clone()
        .oneshot(bare("GET", "/sessions/overlay-42/messages"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let history: Vec<ChatMessage> = json_body(response).await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].content, "any ideas?");
    assert_eq!(history[1].content, chat_resp.text);

    let response = app
        .clone()
        .oneshot(bare("DELETE", "/sessions/overlay-42"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(bare("GET", "/sessions/overlay-42/messages"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health() {
    let scratch = Scratch::new();
    let response = scratch.router().oneshot(bare("GET", "/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = json_body(response).await;
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn test_chat_ignores_non_string_session_id() {
    let scratch = Scratch::new();
    let response = scratch
        .router()
        .oneshot(post_json(
            "/chat",
            r#"{"message": "please summarize this", "session_id": 7}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let chat_resp: ChatResponse = json_body(response).await;
    assert_eq!(
        chat_resp.text,
        "Here's a concise summary:\n\n• Key point 1\n• Key point 2\n• Key point 3"
    );
    assert!(chat_resp.session_id.is_none());
}

#[tokio::test]
async fn test_static_ui_fallback() {
    let scratch = Scratch::new();
    std::fs::write(
        scratch.dir.join("public").join("index.html"),
        "<html>overlay</html>",
    )
    .unwrap();
    let app = scratch.router();

    let response = app.clone().oneshot(bare("GET", "/index.html")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"<html>overlay</html>");

    let response = app.clone().oneshot(bare("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_json("/api/chat", r#"{"message": "any ideas?"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let chat_resp: ChatResponse = json_body(response).await;
    assert!(chat_resp.text.starts_with("Here are 5 creative ideas"));

    let response = app.oneshot(bare("GET", "/missing.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_prompt_query_is_json_error() {
    let scratch = Scratch::new();
    let response = scratch
        .router()
        .oneshot(bare("GET", "/prompts?q=a&q=b"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let err: serde_json::Value = json_body(response).await;
    assert!(err["error"].is_string());
}

#[tokio::test]
async fn test_whitespace_prompt_is_accepted() {
    let scratch = Scratch::new();
    let response = scratch
        .router()
        .oneshot(post_json("/prompts", r#"{"title": " ", "content": " "}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}
