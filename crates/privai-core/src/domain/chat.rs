//! Chat completion domain types.
//!
//! These types represent an inbound chat completion request as the front end
//! sends it, and the pure prompt-building step applied before forwarding.

use serde::{Deserialize, Serialize};

use crate::ports::CompletionError;

/// Cue appended after the conversation so the upstream model answers as the assistant.
pub const ASSISTANT_CUE: &str = "assistant: ";

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    /// Parse a role from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }

    /// Convert role to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A prior message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Model reference as sent by clients.
///
/// The chat UI posts the whole model descriptor (`{ "id", "name" }`), other
/// callers send the bare identifier. Both resolve to the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelRef {
    Id(String),
    Descriptor {
        id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl ModelRef {
    /// The model identifier used for endpoint routing.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) | Self::Descriptor { id, .. } => id,
        }
    }
}

/// Inbound chat completion request.
///
/// Wire shape: `{ model, messages, key, prompt, temperature }`, where `prompt`
/// is the system prompt that precedes the conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: ModelRef,
    pub messages: Vec<ChatMessage>,
    /// Client-supplied API key. Accepted for wire compatibility, never forwarded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(rename = "prompt")]
    pub system_prompt: String,
    pub temperature: f64,
}

impl CompletionRequest {
    /// Parse and validate a request body.
    ///
    /// Missing fields, unknown roles and out-of-range temperatures are all
    /// reported as [`CompletionError::InvalidRequest`].
    pub fn from_json(body: &[u8]) -> Result<Self, CompletionError> {
        let request: Self = serde_json::from_slice(body)
            .map_err(|e| CompletionError::InvalidRequest(e.to_string()))?;
        request.validate()?;
        Ok(request)
    }

    /// Check field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), CompletionError> {
        if self.model.id().trim().is_empty() {
            return Err(CompletionError::InvalidRequest(
                "model identifier must not be empty".into(),
            ));
        }
        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(CompletionError::InvalidRequest(format!(
                "temperature must be a non-negative number, got {}",
                self.temperature
            )));
        }
        Ok(())
    }

    /// The prompt text sent upstream for this request.
    #[must_use]
    pub fn prompt_text(&self) -> String {
        build_prompt(&self.system_prompt, &self.messages)
    }
}

/// Build the upstream prompt from a system prompt and the prior messages.
///
/// Layout: the system prompt, a newline, one `role: content` line per message
/// joined by newlines, a newline, then [`ASSISTANT_CUE`] with nothing after it.
#[must_use]
pub fn build_prompt(system_prompt: &str, messages: &[ChatMessage]) -> String {
    let history = messages
        .iter()
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{system_prompt}\n{history}\n{ASSISTANT_CUE}")
}
