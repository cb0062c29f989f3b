//! Provider configuration from the environment.

/// API key variable. Absent means name generation runs in offline mode.
pub const ENV_API_KEY: &str = "RIGFORGE_AI_API_KEY";

/// Base URL variable for OpenAI-compatible providers.
pub const ENV_BASE_URL: &str = "RIGFORGE_AI_BASE_URL";

/// Model variable.
pub const ENV_MODEL: &str = "RIGFORGE_AI_MODEL";

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Settings for the chat completion call.
#[derive(Debug, Clone)]
pub struct NamegenConfig {
    /// Bearer token. `None` disables the provider entirely.
    pub api_key: Option<String>,

    /// Provider base URL, without the `/chat/completions` suffix.
    pub base_url: String,

    pub model: String,
}

impl NamegenConfig {
    /// Reads configuration from the process environment. Missing base URL
    /// and model fall back to OpenRouter defaults; a missing key is kept
    /// as `None` so callers take the offline path.
    pub fn from_env() -> Self {
        NamegenConfig {
            api_key: read_env(ENV_API_KEY),
            base_url: read_env(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: read_env(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    /// Offline configuration: no key, defaults everywhere.
    pub fn offline() -> Self {
        NamegenConfig {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// The full chat completions endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let mut config = NamegenConfig::offline();
        config.base_url = "https://example.com/v1/".to_string();
        assert_eq!(config.endpoint(), "https://example.com/v1/chat/completions");
    }

    #[test]
    fn test_offline_has_no_key() {
        let config = NamegenConfig::offline();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
