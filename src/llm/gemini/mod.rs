//! Google Gemini provider.
//!
//! Authentication: an explicit API key (config or `--api-key`), then the
//! `GEMINI_API_KEY` and `GOOGLE_API_KEY` environment variables. The key is sent
//! in the `x-goog-api-key` header so it never appears in request URLs.

use crate::llm::{api_error, build_provider_client, sanitize_api_error, traits::Provider};
use anyhow::Context;
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;

mod types;
use types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const MAX_OUTPUT_TOKENS: u32 = 2048;

pub struct GeminiProvider {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl GeminiProvider {
    /// Create a provider against the public Gemini endpoint.
    pub fn new(api_key: Option<&str>) -> Self {
        Self::with_base_url(GEMINI_BASE_URL, api_key, build_provider_client())
    }

    pub fn with_base_url(base_url: &str, api_key: Option<&str>, client: Client) -> Self {
        let resolved_key = api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(String::from)
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .filter(|k| !k.trim().is_empty());

        Self {
            api_key: resolved_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn model_name(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/{}:generateContent",
            self.base_url,
            Self::model_name(model)
        )
    }

    fn api_key(&self) -> anyhow::Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Gemini API key not found. Set GEMINI_API_KEY, add `api_key` to the \
                 gradecraft config, or get a key from https://aistudio.google.com/app/apikey"
            )
        })
    }

    fn build_request(message: &str, temperature: f64) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: message.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }

    fn extract_text(result: &GenerateContentResponse) -> anyhow::Result<String> {
        if let Some(err) = &result.error {
            anyhow::bail!("Gemini API error: {}", sanitize_api_error(&err.message));
        }

        if let Some(reason) = result
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            anyhow::bail!("Gemini blocked the prompt ({reason})");
        }

        let candidate = result
            .candidates
            .first()
            .ok_or_else(|| anyhow::anyhow!("No response from Gemini"))?;

        let text = candidate
            .content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n");

        if text.trim().is_empty() {
            let reason = candidate.finish_reason.as_deref().unwrap_or("UNKNOWN");
            anyhow::bail!("Gemini returned no text (finish reason {reason})");
        }

        Ok(text)
    }

    async fn call_api(
        &self,
        message: &str,
        model: &str,
        temperature: f64,
    ) -> anyhow::Result<GenerateContentResponse> {
        let api_key = self.api_key()?;
        let request = Self::build_request(message, temperature);

        let response = self
            .client
            .post(self.generate_url(model))
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .context("Gemini request failed")?;

        if !response.status().is_success() {
            return Err(api_error("Gemini", response).await);
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .context("Gemini response JSON decode failed")?;

        if let Some(usage) = &result.usage_metadata {
            tracing::debug!(
                model = result.model_version.as_deref().unwrap_or(model),
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "gemini usage"
            );
        }

        Ok(result)
    }
}

impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn chat<'a>(
        &'a self,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            let result = self.call_api(message, model, temperature).await?;
            Self::extract_text(&result)
        })
    }
}
