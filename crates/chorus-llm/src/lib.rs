//! Reply generation: turns a personality, a post and its thread into reply
//! text using a language-model backend.

pub mod anthropic;
pub mod config;
pub mod openai;
pub mod provider;

use std::sync::Arc;

use async_trait::async_trait;
use chorus_personas::prompt::{PromptMessage, build_prompt};
use chorus_personas::{Personality, PersonalityRegistry};
use chorus_types::models::Message;

pub use config::LlmConfig;
pub use provider::from_config;

/// Sampling parameters shared by every backend.
pub const TEMPERATURE: f32 = 0.9;
pub const MAX_TOKENS: u32 = 100;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("No language model provider is configured")]
    NotConfigured,

    #[error("LLM request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("LLM API returned error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("LLM returned an empty reply")]
    EmptyResponse,
}

/// Produces reply text for an automated participant.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(
        &self,
        personality: &Personality,
        content: &str,
        context: &[Message],
        user: &str,
    ) -> Result<String, GenerationError>;
}

/// A vendor chat-completion endpoint.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(&self, prompt: &[PromptMessage]) -> Result<String, GenerationError>;
}

/// `ReplyGenerator` that renders the personality prompt and sends it to a
/// chat backend.
pub struct LlmReplyGenerator {
    backend: Box<dyn ChatBackend>,
    registry: Arc<PersonalityRegistry>,
}

impl LlmReplyGenerator {
    pub fn new(backend: Box<dyn ChatBackend>, registry: Arc<PersonalityRegistry>) -> Self {
        Self { backend, registry }
    }
}

#[async_trait]
impl ReplyGenerator for LlmReplyGenerator {
    fn name(&self) -> &str {
        self.backend.name()
    }

    async fn generate(
        &self,
        personality: &Personality,
        content: &str,
        context: &[Message],
        user: &str,
    ) -> Result<String, GenerationError> {
        let prompt = build_prompt(&self.registry, personality, content, context, user);
        let reply = self.backend.complete(&prompt).await?;

        let reply = reply.trim();
        if reply.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(reply.to_string())
    }
}

/// Used when no provider is configured: every call fails, so callers take
/// their fallback path.
pub struct Unavailable;

#[async_trait]
impl ReplyGenerator for Unavailable {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn generate(
        &self,
        _personality: &Personality,
        _content: &str,
        _context: &[Message],
        _user: &str,
    ) -> Result<String, GenerationError> {
        Err(GenerationError::NotConfigured)
    }
}
