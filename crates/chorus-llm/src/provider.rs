use std::sync::Arc;

use chorus_personas::PersonalityRegistry;
use tracing::{info, warn};

use crate::anthropic::AnthropicBackend;
use crate::config::LlmConfig;
use crate::openai::OpenAiBackend;
use crate::{ChatBackend, LlmReplyGenerator, ReplyGenerator, Unavailable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Azure,
    OpenAi,
    Anthropic,
}

/// Resolve the requested provider against the available credentials.
///
/// A provider missing its credentials falls through the chain
/// azure → openai → anthropic. `None` means nothing usable is configured.
pub fn choose(config: &LlmConfig) -> Option<Provider> {
    let requested = config.provider.as_deref()?.to_ascii_lowercase();

    let start = match requested.as_str() {
        "azure" => 0,
        "openai" => 1,
        "anthropic" => 2,
        other => {
            warn!("Unknown LLM_PROVIDER '{}'", other);
            return None;
        }
    };

    let chain = [
        (Provider::Azure, config.azure_endpoint.is_some() && config.azure_api_key.is_some()),
        (Provider::OpenAi, config.openai_api_key.is_some()),
        (Provider::Anthropic, config.anthropic_api_key.is_some()),
    ];

    for (provider, usable) in &chain[start..] {
        if *usable {
            return Some(*provider);
        }
        warn!("{:?} credentials not found, trying the next provider", provider);
    }
    None
}

/// Build the reply generator for `config`. Falls back to [`Unavailable`]
/// when no provider can be used.
pub fn from_config(config: &LlmConfig, registry: Arc<PersonalityRegistry>) -> Arc<dyn ReplyGenerator> {
    let backend: Box<dyn ChatBackend> = match choose(config) {
        Some(Provider::Azure) => Box::new(OpenAiBackend::azure(
            config.azure_endpoint.as_deref().unwrap_or_default(),
            config.azure_api_key.clone().unwrap_or_default(),
            &config.azure_deployment,
            &config.azure_api_version,
            config.timeout,
        )),
        Some(Provider::OpenAi) => Box::new(OpenAiBackend::openai(
            &config.openai_base_url,
            config.openai_api_key.clone().unwrap_or_default(),
            config.openai_model.clone(),
            config.timeout,
        )),
        Some(Provider::Anthropic) => Box::new(AnthropicBackend::new(
            config.anthropic_api_key.clone().unwrap_or_default(),
            config.anthropic_model.clone(),
            config.timeout,
        )),
        None => {
            warn!("No LLM provider configured; automated replies will use fallback templates");
            return Arc::new(Unavailable);
        }
    };

    info!("Reply generation via {}", backend.name());
    Arc::new(LlmReplyGenerator::new(backend, registry))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(provider: &str) -> LlmConfig {
        LlmConfig {
            provider: Some(provider.into()),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn nothing_requested_means_no_provider() {
        assert_eq!(choose(&LlmConfig::default()), None);
    }

    #[test]
    fn azure_without_credentials_falls_through_to_openai() {
        let cfg = LlmConfig {
            openai_api_key: Some("sk".into()),
            ..config("azure")
        };
        assert_eq!(choose(&cfg), Some(Provider::OpenAi));
    }

    #[test]
    fn openai_without_key_falls_through_to_anthropic() {
        let cfg = LlmConfig {
            anthropic_api_key: Some("ak".into()),
            ..config("OpenAI")
        };
        assert_eq!(choose(&cfg), Some(Provider::Anthropic));
    }

    #[test]
    fn anthropic_never_falls_back_upward() {
        let cfg = LlmConfig {
            openai_api_key: Some("sk".into()),
            ..config("anthropic")
        };
        assert_eq!(choose(&cfg), None);
    }

    #[test]
    fn azure_needs_endpoint_and_key() {
        let cfg = LlmConfig {
            azure_endpoint: Some("https://x.openai.azure.com".into()),
            azure_api_key: Some("k".into()),
            ..config("azure")
        };
        assert_eq!(choose(&cfg), Some(Provider::Azure));
    }

    #[test]
    fn unknown_provider_is_unusable() {
        let cfg = LlmConfig {
            openai_api_key: Some("sk".into()),
            ..config("llama")
        };
        assert_eq!(choose(&cfg), None);
        let generator = from_config(&cfg, Arc::new(PersonalityRegistry::builtin()));
        assert_eq!(generator.name(), "unavailable");
    }
}
