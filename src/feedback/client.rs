use crate::config::Config;
use crate::error::ServiceError;
use crate::llm::{Provider, create_provider};

/// Sends one prompt to the configured provider and returns the feedback text.
pub struct FeedbackClient {
    provider: Box<dyn Provider>,
    model: String,
    temperature: f64,
}

impl FeedbackClient {
    pub fn new(provider: Box<dyn Provider>, model: impl Into<String>, temperature: f64) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
        }
    }

    /// Build the provider named by `default_provider` with the config's key,
    /// endpoint and timeout.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = create_provider(
            &config.default_provider,
            config.api_key.as_deref(),
            config.provider_base_url.as_deref(),
            config.request_timeout_secs,
        )?;
        Ok(Self::new(
            provider,
            config.default_model.clone(),
            config.default_temperature,
        ))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Single request, no retry. Every failure, including an empty reply,
    /// comes back as a [`ServiceError`].
    pub async fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        tracing::debug!(
            provider = self.provider.name(),
            model = %self.model,
            prompt_chars = prompt.len(),
            "requesting feedback"
        );

        let text = self
            .provider
            .chat(prompt, &self.model, self.temperature)
            .await
            .map_err(|e| ServiceError::new(format!("{e:#}")))?;

        let text = text.trim();
        if text.is_empty() {
            return Err(ServiceError::new("the service returned an empty response"));
        }
        Ok(text.to_string())
    }
}
