use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::debug;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, MessageRole, TextRequest, TextResponse},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload?;
    let message = payload
        .message()
        .ok_or_else(|| AppError::BadRequest("message is required".to_string()))?;

    let session_id = payload.session_id().map(str::to_string);
    if let Some(sid) = &session_id {
        state.sessions.append_message(sid, MessageRole::User, message).await;
    }

    let text = state.assistant.chat(message).await;

    if let Some(sid) = &session_id {
        let len = state.sessions.append_message(sid, MessageRole::Assistant, &text).await;
        debug!(session_id = %sid, messages = len, "transcript updated");
    }

    Ok(Json(ChatResponse { text, session_id }))
}

pub async fn text_handler(
    State(state): State<SharedState>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<TextResponse>, AppError> {
    let Json(payload) = payload?;
    let text = payload
        .text()
        .ok_or_else(|| AppError::BadRequest("text is required".to_string()))?;

    let mode = payload.mode();
    debug!(%mode, "processing text");
    let text = state
        .assistant
        .process_text(mode, text, payload.language())
        .await;

    Ok(Json(TextResponse { text }))
}
