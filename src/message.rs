// src/message.rs
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Completion proxy
// ---------------------------------------------------------------------------

/// Body of `POST /chat`. Fields are kept loosely typed so that a missing or
/// non-string `message` can be reported as a 400 by the handler, and a
/// malformed `session_id` just means "no session".
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub session_id: Option<Value>,
}

impl ChatRequest {
    pub fn message(&self) -> Option<&str> {
        non_empty_str(self.message.as_ref())
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Body of `POST /text`.
#[derive(Debug, Default, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub mode: Option<Value>,
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default)]
    pub language: Option<Value>,
}

impl TextRequest {
    pub fn text(&self) -> Option<&str> {
        non_empty_str(self.text.as_ref())
    }

    pub fn mode(&self) -> TextMode {
        match &self.mode {
            None | Some(Value::Null) => TextMode::default(),
            Some(Value::String(s)) if s.is_empty() => TextMode::default(),
            Some(Value::String(s)) => TextMode::from_name(s),
            Some(_) => TextMode::Expand,
        }
    }

    pub fn language(&self) -> Option<&str> {
        non_empty_str(self.language.as_ref())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TextResponse {
    pub text: String,
}

/// Text transformation selected on `POST /text`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMode {
    #[default]
    Summarize,
    Rephrase,
    Translate,
    Expand,
}

impl TextMode {
    /// Unknown names fall through to `Expand`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "summarize" => TextMode::Summarize,
            "rephrase" => TextMode::Rephrase,
            "translate" => TextMode::Translate,
            _ => TextMode::Expand,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TextMode::Summarize => "summarize",
            TextMode::Rephrase => "rephrase",
            TextMode::Translate => "translate",
            TextMode::Expand => "expand",
        }
    }
}

impl fmt::Display for TextMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Overlay transcript
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Prompt library
// ---------------------------------------------------------------------------

pub const DEFAULT_CATEGORY: &str = "Writing";

/// A prompt as stored in the library blob. Field names match the browser's
/// `ai-buddy-prompts` layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPrompt {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPrompt {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl NewPrompt {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: Some(category.into()),
        }
    }

    /// Both title and content are required.
    pub fn is_complete(&self) -> bool {
        !self.title.is_empty() && !self.content.is_empty()
    }

    pub fn category(&self) -> &str {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }
}

/// Query string of `GET /prompts`.
#[derive(Debug, Default, Deserialize)]
pub struct PromptQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}
