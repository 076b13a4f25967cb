// src/services/assistant.rs
use std::sync::Arc;

use tracing::{info, warn};

use super::fallback;
use super::llm_client::{CompletionBackend, OpenAiClient};
use crate::config::LlmConfig;
use crate::message::TextMode;

const CHAT_SYSTEM_PROMPT: &str = "You are a concise and helpful assistant.";
const CHAT_TEMPERATURE: f32 = 0.7;
const TEXT_TEMPERATURE: f32 = 0.4;
const EMPTY_CHAT_REPLY: &str = "I could not generate a response.";
const DEFAULT_TRANSLATE_LANGUAGE: &str = "English";

/// Routes requests to the hosted model when one is configured and falls back
/// to canned replies otherwise. Hosted-model errors never reach the caller.
#[derive(Clone, Default)]
pub struct Assistant {
    backend: Option<Arc<dyn CompletionBackend>>,
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("hosted", &self.backend.is_some())
            .finish()
    }
}

impl Assistant {
    /// An assistant that only ever answers with canned replies.
    pub fn fallback_only() -> Self {
        Self { backend: None }
    }

    pub fn with_backend(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend: Some(backend) }
    }

    pub fn from_config(cfg: &LlmConfig) -> Self {
        match OpenAiClient::from_config(cfg) {
            Some(client) => {
                info!(model = client.model(), "hosted model enabled");
                Self::with_backend(Arc::new(client))
            }
            None => {
                info!("no API key configured, using canned replies");
                Self::fallback_only()
            }
        }
    }

    pub fn is_hosted(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn chat(&self, message: &str) -> String {
        if let Some(backend) = &self.backend {
            match backend
                .complete(CHAT_SYSTEM_PROMPT, message, CHAT_TEMPERATURE)
                .await
            {
                Ok(text) => {
                    let text = text.trim();
                    return if text.is_empty() {
                        EMPTY_CHAT_REPLY.to_string()
                    } else {
                        text.to_string()
                    };
                }
                Err(e) => warn!(error = %e, "hosted chat failed, using canned reply"),
            }
        }
        fallback::chat_reply(message)
    }

    pub async fn process_text(&self, mode: TextMode, text: &str, language: Option<&str>) -> String {
        if let Some(backend) = &self.backend {
            let system = text_system_prompt(mode, language);
            match backend.complete(&system, text, TEXT_TEMPERATURE).await {
                Ok(out) => return out.trim().to_string(),
                Err(e) => warn!(error = %e, %mode, "hosted text processing failed, using canned reply"),
            }
        }
        fallback::text_reply(mode, text, language)
    }
}

pub fn text_system_prompt(mode: TextMode, language: Option<&str>) -> String {
    match mode {
        TextMode::Summarize => "Summarize the user text in 2-4 bullet points.".to_string(),
        TextMode::Rephrase => "Rewrite the user text to be more professional and clear.".to_string(),
        TextMode::Translate => format!(
            "Translate the user text to {} while keeping tone.",
            language.unwrap_or(DEFAULT_TRANSLATE_LANGUAGE)
        ),
        TextMode::Expand => {
            "Expand the user text with helpful detail and examples, keep it concise.".to_string()
        }
    }
}
