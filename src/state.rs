// src/state.rs
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::services::assistant::Assistant;
use crate::services::prompt_store::PromptStore;
use crate::services::session_manager::SessionManager;

pub type SharedState = Arc<AppState>;

#[derive(Debug)]
pub struct AppState {
    pub assistant: Assistant,
    pub prompts: PromptStore,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(assistant: Assistant, prompts: PromptStore, session_ttl: Duration) -> Self {
        Self {
            assistant,
            prompts,
            sessions: SessionManager::new(session_ttl),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Assistant::from_config(&config.llm),
            PromptStore::in_dir(&config.data_dir),
            config.session_ttl,
        )
    }
}
