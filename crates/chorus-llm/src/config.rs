use std::time::Duration;

/// Provider credentials and model names, read from the environment.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// `azure`, `openai` or `anthropic`.
    pub provider: Option<String>,

    pub azure_endpoint: Option<String>,
    pub azure_api_key: Option<String>,
    pub azure_deployment: String,
    pub azure_api_version: String,

    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,

    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,

    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: None,
            azure_endpoint: None,
            azure_api_key: None,
            azure_deployment: "gpt-4.1".into(),
            azure_api_version: "2024-12-01-preview".into(),
            openai_api_key: None,
            openai_model: "gpt-4.1".into(),
            openai_base_url: "https://api.openai.com/v1".into(),
            anthropic_api_key: None,
            anthropic_model: "claude-sonnet-4-20250514".into(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: non_empty("LLM_PROVIDER"),
            azure_endpoint: non_empty("AZURE_OPENAI_ENDPOINT"),
            azure_api_key: non_empty("AZURE_OPENAI_API_KEY"),
            azure_deployment: non_empty("AZURE_OPENAI_DEPLOYMENT_NAME")
                .unwrap_or(defaults.azure_deployment),
            azure_api_version: non_empty("AZURE_OPENAI_API_VERSION")
                .unwrap_or(defaults.azure_api_version),
            openai_api_key: non_empty("OPENAI_API_KEY"),
            openai_model: non_empty("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_base_url: non_empty("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            anthropic_api_key: non_empty("ANTHROPIC_API_KEY"),
            anthropic_model: non_empty("ANTHROPIC_MODEL").unwrap_or(defaults.anthropic_model),
            timeout: non_empty("LLM_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
