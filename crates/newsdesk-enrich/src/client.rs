//! HTTP client for the OpenAI chat completions API.
//!
//! Wraps `reqwest` with bearer authentication, the fixed classification
//! prompt, and strict structured-output parsing. API-level failures are
//! surfaced as [`EnrichError::Api`] with the server's message when one
//! is present.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::EnrichError;
use crate::schema::response_schema;
use crate::types::{
    ChatMessage, ChatRequest, ChatResponse, EventInsight, JsonSchemaFormat, ResponseFormat,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Instruction shared by every request. The category list here must stay
/// in lockstep with `EventCategory`.
const SYSTEM_PROMPT: &str = "Identify the actors involved in the news article. \
Then, analyze the content and classify the news into these categories: \
Political Turmoil, New Product Announced, Leadership Change, Housing Issues, or Others.";

// One worked example keeps the model's role phrasing consistent across runs.
const EXAMPLE_ARTICLE: &str = "Apple announces new iPhone model with improved features";
const EXAMPLE_ANSWER: &str = r#"{"main_actors": [{"name": "Apple", "role": "Company announcing a new product launch"}], "other_actors": [], "category": "New Product Announced"}"#;

/// Anything that can turn article text into an [`EventInsight`].
///
/// The production implementation is [`OpenAiClient`]; tests substitute
/// scripted fakes.
#[async_trait]
pub trait EventAnalyzer: Send + Sync {
    /// Analyzes one article's text.
    ///
    /// # Errors
    ///
    /// Implementations return [`EnrichError`] when the analysis cannot be
    /// produced; callers decide whether that is fatal.
    async fn analyze(&self, text: &str) -> Result<EventInsight, EnrichError>;
}

/// Client for the OpenAI chat completions API.
///
/// Use [`OpenAiClient::new`] for production or
/// [`OpenAiClient::with_base_url`] to point at a mock server in tests.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a client pointed at the production OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, EnrichError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, EnrichError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("newsdesk/0.1 (news enrichment)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Assembles the completions request for one article's text.
    fn build_request(&self, text: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(EXAMPLE_ARTICLE),
                ChatMessage::assistant(EXAMPLE_ANSWER),
                ChatMessage::user(text),
            ],
            temperature: 0.0,
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: "event_insight",
                    strict: true,
                    schema: response_schema(),
                },
            },
        }
    }
}

#[async_trait]
impl EventAnalyzer for OpenAiClient {
    /// Sends the article text for analysis and parses the structured reply.
    ///
    /// # Errors
    ///
    /// - [`EnrichError::Api`] if the API answers with a non-2xx status.
    /// - [`EnrichError::Http`] on network failure.
    /// - [`EnrichError::MissingContent`] if the completion has no message
    ///   content.
    /// - [`EnrichError::Deserialize`] if the response or its content does
    ///   not match the expected shape.
    async fn analyze(&self, text: &str) -> Result<EventInsight, EnrichError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = self.build_request(text);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(EnrichError::Api {
                status,
                message: api_error_message(&body),
            });
        }

        let completion: ChatResponse =
            serde_json::from_str(&body).map_err(|e| EnrichError::Deserialize {
                context: "chat completions response".to_string(),
                source: e,
            })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(EnrichError::MissingContent)?;

        let insight: EventInsight =
            serde_json::from_str(&content).map_err(|e| EnrichError::Deserialize {
                context: "structured event insight".to_string(),
                source: e,
            })?;

        tracing::debug!(
            main_actors = insight.main_actors.len(),
            other_actors = insight.other_actors.len(),
            category = %insight.category,
            "analyzed article"
        );

        Ok(insight)
    }
}

/// Pulls `error.message` out of an OpenAI error body, falling back to the
/// raw body when it is not the documented JSON shape.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| {
            let mut message = body.trim().to_string();
            message.truncate(200);
            message
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> OpenAiClient {
        OpenAiClient::with_base_url("test-key", "gpt-4o-mini", 30, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_request_carries_prompt_example_and_article() {
        let client = test_client("https://api.openai.com/v1");
        let request = client.build_request("Parliament dissolved ahead of snap election");

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.messages.len(), 4);
        assert_eq!(request.messages[0].role, "system");
        assert!(request.messages[0].content.contains("Political Turmoil"));
        assert_eq!(request.messages[2].role, "assistant");
        assert_eq!(
            request.messages[3].content,
            "Parliament dissolved ahead of snap election"
        );
        assert_eq!(request.temperature, 0.0);
        assert_eq!(request.response_format.format_type, "json_schema");
        assert!(request.response_format.json_schema.strict);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = test_client("http://localhost:9000/v1/");
        assert_eq!(client.base_url, "http://localhost:9000/v1");
    }

    #[test]
    fn api_error_message_reads_documented_shape() {
        let body = r#"{"error": {"message": "Rate limit reached", "type": "requests"}}"#;
        assert_eq!(api_error_message(body), "Rate limit reached");
    }

    #[test]
    fn api_error_message_falls_back_to_raw_body() {
        assert_eq!(api_error_message("upstream timeout"), "upstream timeout");
    }
}
