// src/routes/mod.rs
pub mod chat;
pub mod prompts;
pub mod sessions;

use std::path::Path;

use crate::state::SharedState;
use axum::{
    Json, Router,
    routing::{delete, get, post},
};
use chat::{chat_handler, text_handler};
use prompts::{delete_prompt_handler, list_prompts_handler, save_prompt_handler};
use serde_json::{Value, json};
use sessions::{end_session_handler, history_handler};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// API routes, served both at the root and under `/api`.
fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/chat", post(chat_handler))
        .route("/text", post(text_handler))
        .route("/prompts", get(list_prompts_handler).post(save_prompt_handler))
        .route("/prompts/{id}", delete(delete_prompt_handler))
        .route("/sessions/{id}/messages", get(history_handler))
        .route("/sessions/{id}", delete(end_session_handler))
        .route("/health", get(health))
}

/// API routes at the root and under `/api`; anything else is served from
/// the built overlay UI in `static_dir`.
pub fn create_router(static_dir: impl AsRef<Path>) -> Router<SharedState> {
    Router::new()
        .merge(api_routes())
        .nest("/api", api_routes())
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}
