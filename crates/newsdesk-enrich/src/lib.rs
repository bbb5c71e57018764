//! LLM-backed article enrichment.
//!
//! Sends article text to the OpenAI chat completions API with a strict
//! JSON schema response format and parses the result into typed actor
//! mentions plus an event category. [`extract_actors`] wraps the client
//! with per-article fault isolation: one bad article never poisons the
//! rest of the batch.

pub mod client;
pub mod error;
pub mod extract;
pub mod schema;
pub mod types;

pub use client::{EventAnalyzer, OpenAiClient};
pub use error::EnrichError;
pub use extract::extract_actors;
pub use types::{ActorMention, EventInsight};
