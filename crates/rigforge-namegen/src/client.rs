//! OpenAI-compatible chat client for build name suggestions.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::config::NamegenConfig;
use crate::NamegenError;

/// One component line fed into the prompt.
#[derive(Debug, Clone)]
pub struct ComponentSummary {
    pub name: String,
    /// Human-readable category label ("CPU", "GPU", ...).
    pub category: String,
}

/// A source of build name suggestions.
///
/// The trait seam exists so the console (and tests) can swap the HTTP
/// client for a canned source.
#[async_trait]
pub trait NameSource: Send + Sync {
    async fn generate_name(&self, components: &[ComponentSummary]) -> Result<String, NamegenError>;
}

/// Chat-completion-backed name source.
#[derive(Debug, Clone)]
pub struct ChatNameSource {
    config: NamegenConfig,
    client: reqwest::Client,
}

impl ChatNameSource {
    pub fn new(config: NamegenConfig) -> Self {
        ChatNameSource {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NameSource for ChatNameSource {
    async fn generate_name(&self, components: &[ComponentSummary]) -> Result<String, NamegenError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(NamegenError::MissingApiKey)?;

        let body = json!({
            "model": self.config.model,
            "messages": [{
                "role": "user",
                "content": build_prompt(components),
            }],
        });

        let response = self
            .client
            .post(self.config.endpoint())
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|err| NamegenError::Request(err.to_string()))?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|err| NamegenError::Request(err.to_string()))?;

        if !status.is_success() {
            return Err(NamegenError::Provider {
                status: status.as_u16(),
                body: body_text,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body_text)
            .map_err(|err| NamegenError::Parse(err.to_string()))?;

        let content = parsed
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .map(|s| clean_name(&s))
            .filter(|s| !s.is_empty())
            .ok_or(NamegenError::EmptyResponse)?;

        debug!(name = %content, "provider suggested build name");
        Ok(content)
    }
}

/// Suggests a name for a build, never failing.
///
/// Offline mode (no API key) short-circuits to `Custom Build <date>`
/// without touching the network; any provider failure degrades to
/// `Pro Build <date>`.
pub async fn suggest_build_name(
    source: &dyn NameSource,
    config: &NamegenConfig,
    components: &[ComponentSummary],
) -> String {
    let today = chrono::Utc::now().format("%Y-%m-%d");
    if config.api_key.is_none() {
        return format!("Custom Build {}", today);
    }
    match source.generate_name(components).await {
        Ok(name) => name,
        Err(err) => {
            warn!(error = %err, "build name generation failed, using fallback");
            format!("Pro Build {}", today)
        }
    }
}

/// Builds the user prompt: one bullet per component, strict output rules.
fn build_prompt(components: &[ComponentSummary]) -> String {
    let mut prompt = String::from(
        "Suggest a cool, catchy name for a custom PC build with these components:\n",
    );
    for component in components {
        prompt.push_str(&format!("- {} ({})\n", component.name, component.category));
    }
    prompt.push_str(
        "\nRespond with the name only, no quotes and no explanation. \
         Two words maximum. Examples: Aegis Fury, Nova Prime, Crimson Forge.",
    );
    prompt
}

/// Trims whitespace, surrounding quotes, and keeps the first line only.
/// Providers occasionally wrap the name or append commentary.
fn clean_name(raw: &str) -> String {
    raw.lines()
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedSource(Result<String, NamegenError>);

    #[async_trait]
    impl NameSource for CannedSource {
        async fn generate_name(
            &self,
            _components: &[ComponentSummary],
        ) -> Result<String, NamegenError> {
            match &self.0 {
                Ok(name) => Ok(name.clone()),
                Err(_) => Err(NamegenError::EmptyResponse),
            }
        }
    }

    fn components() -> Vec<ComponentSummary> {
        vec![
            ComponentSummary {
                name: "Ryzen 9 5900X".to_string(),
                category: "CPU".to_string(),
            },
            ComponentSummary {
                name: "RTX 4070".to_string(),
                category: "GPU".to_string(),
            },
        ]
    }

    #[test]
    fn test_prompt_lists_components() {
        let prompt = build_prompt(&components());
        assert!(prompt.contains("- Ryzen 9 5900X (CPU)"));
        assert!(prompt.contains("- RTX 4070 (GPU)"));
        assert!(prompt.contains("no quotes"));
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("\"Nova Prime\""), "Nova Prime");
        assert_eq!(clean_name("  Aegis Fury  \n"), "Aegis Fury");
        assert_eq!(clean_name("Crimson Forge\nA name evoking..."), "Crimson Forge");
        assert_eq!(clean_name("'Ember Core'"), "Ember Core");
    }

    #[tokio::test]
    async fn test_offline_mode_skips_provider() {
        let config = NamegenConfig::offline();
        // A source that would succeed; offline mode must not even ask it
        let source = CannedSource(Ok("Should Not Appear".to_string()));

        let name = suggest_build_name(&source, &config, &components()).await;
        assert!(name.starts_with("Custom Build "));
    }

    #[tokio::test]
    async fn test_provider_failure_degrades_to_fallback() {
        let mut config = NamegenConfig::offline();
        config.api_key = Some("test-key".to_string());
        let source = CannedSource(Err(NamegenError::EmptyResponse));

        let name = suggest_build_name(&source, &config, &components()).await;
        assert!(name.starts_with("Pro Build "));
    }

    #[tokio::test]
    async fn test_provider_success_passes_through() {
        let mut config = NamegenConfig::offline();
        config.api_key = Some("test-key".to_string());
        let source = CannedSource(Ok("Nova Prime".to_string()));

        let name = suggest_build_name(&source, &config, &components()).await;
        assert_eq!(name, "Nova Prime");
    }
}
