//! Generic OpenAI-compatible provider.
//!
//! Covers OpenAI itself, OpenRouter, Groq, a local Ollama server and any other
//! endpoint that speaks `POST {base}/chat/completions`.

use crate::llm::{api_error, build_provider_client, traits::Provider};
use anyhow::Context;
use reqwest::Client;
use std::future::Future;
use std::pin::Pin;

mod types;
use types::{ChatRequest, ChatResponse, Message, extract_chat_text};

/// How the provider expects the API key to be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStyle {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// No credentials (local servers).
    None,
}

pub struct OpenAiCompatibleProvider {
    name: String,
    base_url: String,
    api_key: Option<String>,
    auth: AuthStyle,
    client: Client,
}

impl OpenAiCompatibleProvider {
    pub fn new(name: &str, base_url: &str, api_key: Option<&str>, auth: AuthStyle) -> Self {
        Self::with_client(name, base_url, api_key, auth, build_provider_client())
    }

    pub fn with_client(
        name: &str,
        base_url: &str,
        api_key: Option<&str>,
        auth: AuthStyle,
        client: Client,
    ) -> Self {
        Self {
            name: name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from),
            auth,
            client,
        }
    }

    fn chat_completions_url(&self) -> String {
        if self.base_url.ends_with("/chat/completions") {
            self.base_url.clone()
        } else {
            format!("{}/chat/completions", self.base_url)
        }
    }

    fn build_request(message: &str, model: &str, temperature: f64) -> ChatRequest {
        ChatRequest {
            model: model.to_string(),
            messages: vec![Message {
                role: "user",
                content: message.to_string(),
            }],
            temperature,
        }
    }

    async fn call_api(
        &self,
        message: &str,
        model: &str,
        temperature: f64,
    ) -> anyhow::Result<String> {
        let request = Self::build_request(message, model, temperature);
        let mut builder = self.client.post(self.chat_completions_url()).json(&request);

        if self.auth == AuthStyle::Bearer {
            let key = self.api_key.as_deref().ok_or_else(|| {
                anyhow::anyhow!(
                    "{} API key not set. Add `api_key` to the gradecraft config or set GRADECRAFT_API_KEY.",
                    self.name
                )
            })?;
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("{} request failed", self.name))?;

        if !response.status().is_success() {
            return Err(api_error(&self.name, response).await);
        }

        let chat: ChatResponse = response
            .json()
            .await
            .with_context(|| format!("{} response JSON decode failed", self.name))?;

        if let Some(usage) = &chat.usage {
            tracing::debug!(
                provider = %self.name,
                model = chat.model.as_deref().unwrap_or(model),
                prompt_tokens = usage.prompt_tokens,
                output_tokens = usage.completion_tokens,
                "chat completion usage"
            );
        }

        extract_chat_text(&chat)
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("No response from {}", self.name))
    }
}

impl Provider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn chat<'a>(
        &'a self,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(self.call_api(message, model, temperature))
    }
}
