//! Conversation turns exchanged with the completion provider.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

/// One prior message in a follow-up conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: TurnRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: TurnRole::Assistant, content: content.into() }
    }
}

/// Read a JSON array of turns. Content is not validated.
pub fn load_history(path: &Path) -> Result<Vec<ConversationTurn>, AppError> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| AppError::ParseError {
        what: format!("conversation history {}", path.display()),
        details: e.to_string(),
    })
}
