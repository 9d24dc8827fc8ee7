use std::time::Duration;

use async_trait::async_trait;
use chorus_personas::prompt::PromptMessage;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{ChatBackend, GenerationError, MAX_TOKENS, TEMPERATURE};

/// How the endpoint expects the key.
#[derive(Debug, Clone)]
enum Auth {
    Bearer(String),
    ApiKeyHeader(String),
}

/// Chat-completions client for OpenAI and OpenAI-compatible endpoints,
/// including Azure OpenAI deployments.
pub struct OpenAiBackend {
    label: &'static str,
    url: String,
    model: Option<String>,
    auth: Auth,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: &'a [PromptMessage],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiBackend {
    pub fn openai(base_url: &str, api_key: String, model: String, timeout: Duration) -> Self {
        Self {
            label: "openai",
            url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: Some(model),
            auth: Auth::Bearer(api_key),
            client: http_client(timeout),
        }
    }

    /// Azure routes by deployment in the URL; the model is implied.
    pub fn azure(
        endpoint: &str,
        api_key: String,
        deployment: &str,
        api_version: &str,
        timeout: Duration,
    ) -> Self {
        Self {
            label: "azure",
            url: format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                endpoint.trim_end_matches('/'),
                deployment,
                api_version
            ),
            model: None,
            auth: Auth::ApiKeyHeader(api_key),
            client: http_client(timeout),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            warn!("Failed to build LLM HTTP client with {:?} timeout, using defaults: {}", timeout, e);
            reqwest::Client::new()
        })
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    fn name(&self) -> &'static str {
        self.label
    }

    async fn complete(&self, prompt: &[PromptMessage]) -> Result<String, GenerationError> {
        let request = ChatCompletionRequest {
            model: self.model.as_deref(),
            messages: prompt,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            top_p: 0.95,
            frequency_penalty: 0.3,
            presence_penalty: 0.3,
        };

        let req = self.client.post(&self.url).json(&request);
        let req = match &self.auth {
            Auth::Bearer(key) => req.bearer_auth(key),
            Auth::ApiKeyHeader(key) => req.header("api-key", key),
        };

        let response = req.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(GenerationError::Api { status, body });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(GenerationError::EmptyResponse)
    }
}
