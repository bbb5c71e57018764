//! OpenAI chat completions wire types and the typed enrichment result.
//!
//! The request side models only the fields this crate actually sends
//! (strict JSON-schema structured output, no tools or streaming). The
//! response side keeps to the minimum needed to pull the message content
//! out of the first choice.

use newsdesk_core::EventCategory;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A single chat message in the completions request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant",
            content: content.into(),
        }
    }
}

/// Body of a `POST /chat/completions` request.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub response_format: ResponseFormat,
}

/// The `response_format` field selecting strict structured output.
#[derive(Debug, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: &'static str,
    pub json_schema: JsonSchemaFormat,
}

/// Named JSON schema the model output must validate against.
#[derive(Debug, Serialize)]
pub struct JsonSchemaFormat {
    pub name: &'static str,
    pub strict: bool,
    pub schema: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Top-level completions response; only `choices` is consumed.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

/// Assistant message inside a choice. `content` is absent when the model
/// refuses or answers with tool calls instead of text.
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

// ---------------------------------------------------------------------------
// Structured output payload
// ---------------------------------------------------------------------------

/// One actor the model identified in an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ActorMention {
    /// Actor name as it should appear in reporting, e.g. `"Apple"`.
    pub name: String,
    /// Free-text description of the actor's part in the event.
    pub role: String,
}

/// The complete analysis for one article: who is involved and what kind
/// of event it is.
///
/// `category` deserializes through [`EventCategory`], so a label outside
/// the closed set fails parsing rather than smuggling an unknown value
/// into storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EventInsight {
    pub main_actors: Vec<ActorMention>,
    pub other_actors: Vec<ActorMention>,
    pub category: EventCategory,
}
