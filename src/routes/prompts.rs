use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};

use crate::{
    error::AppError,
    message::{NewPrompt, PromptQuery, SavedPrompt},
    state::SharedState,
};

pub async fn list_prompts_handler(
    State(state): State<SharedState>,
    query: Result<Query<PromptQuery>, QueryRejection>,
) -> Result<Json<Vec<SavedPrompt>>, AppError> {
    let Query(query) = query?;
    let prompts = state
        .prompts
        .search(query.q.as_deref(), query.category.as_deref())
        .await?;
    Ok(Json(prompts))
}

pub async fn save_prompt_handler(
    State(state): State<SharedState>,
    payload: Result<Json<NewPrompt>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedPrompt>), AppError> {
    let Json(prompt) = payload?;
    if !prompt.is_complete() {
        return Err(AppError::BadRequest(
            "Please fill in both title and content".to_string(),
        ));
    }
    let saved = state.prompts.save(prompt).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn delete_prompt_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.prompts.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("prompt {id}")))
    }
}
