use super::compatible::{AuthStyle, OpenAiCompatibleProvider};
use super::gemini::{GEMINI_BASE_URL, GeminiProvider};
use super::http_client::build_provider_client_with_timeout;
use super::traits::Provider;

/// Resolve the API key for a provider.
///
/// Resolution order:
/// 1. Explicitly provided `api_key` (trimmed, ignored if empty)
/// 2. Provider-specific environment variable (e.g. `GEMINI_API_KEY`)
/// 3. Generic fallback variables (`GRADECRAFT_API_KEY`, `API_KEY`)
pub fn resolve_api_key(name: &str, explicit_api_key: Option<&str>) -> Option<String> {
    if let Some(key) = explicit_api_key.map(str::trim).filter(|k| !k.is_empty()) {
        return Some(key.to_string());
    }

    let provider_env_candidates: &[&str] = match name {
        "gemini" | "google" => &["GEMINI_API_KEY", "GOOGLE_API_KEY"],
        "openai" => &["OPENAI_API_KEY"],
        "openrouter" => &["OPENROUTER_API_KEY"],
        "groq" => &["GROQ_API_KEY"],
        _ => &[],
    };

    provider_env_candidates
        .iter()
        .chain(["GRADECRAFT_API_KEY", "API_KEY"].iter())
        .find_map(|env_var| {
            std::env::var(env_var)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        })
}

/// Maps hosted OpenAI-compatible provider names to `(display_name, base_url)`.
pub fn compatible_provider_defaults(name: &str) -> Option<(&'static str, &'static str)> {
    let defaults = match name {
        "openai" => ("OpenAI", "https://api.openai.com/v1"),
        "openrouter" => ("OpenRouter", "https://openrouter.ai/api/v1"),
        "groq" => ("Groq", "https://api.groq.com/openai/v1"),
        "ollama" => ("Ollama", "http://localhost:11434/v1"),
        _ => return None,
    };
    Some(defaults)
}

/// Names accepted by [`create_provider`].
pub const SUPPORTED_PROVIDERS: [&str; 7] = [
    "gemini",
    "google",
    "openai",
    "openrouter",
    "groq",
    "ollama",
    "compatible",
];

/// Create a boxed [`Provider`] by name.
///
/// Supported providers:
/// - `"gemini"` / `"google"`: native Gemini API
/// - `"openai"`, `"openrouter"`, `"groq"`: hosted OpenAI-compatible APIs
/// - `"ollama"`: local Ollama server, no key
/// - `"compatible"`: any OpenAI-compatible endpoint; `base_url` is required
///
/// `base_url` overrides the default endpoint of every provider.
pub fn create_provider(
    name: &str,
    api_key: Option<&str>,
    base_url: Option<&str>,
    timeout_secs: u64,
) -> anyhow::Result<Box<dyn Provider>> {
    let name = name.trim().to_ascii_lowercase();
    let resolved_key = resolve_api_key(&name, api_key);
    let api_key = resolved_key.as_deref();
    let base_url = base_url.map(str::trim).filter(|url| !url.is_empty());
    let client = build_provider_client_with_timeout(timeout_secs);

    match name.as_str() {
        "gemini" | "google" => {
            return Ok(Box::new(GeminiProvider::with_base_url(
                base_url.unwrap_or(GEMINI_BASE_URL),
                api_key,
                client,
            )));
        }
        "compatible" => {
            let url = base_url.ok_or_else(|| {
                anyhow::anyhow!(
                    "The compatible provider requires a base URL. Set `provider_base_url` \
                     in the config or GRADECRAFT_BASE_URL."
                )
            })?;
            return Ok(Box::new(OpenAiCompatibleProvider::with_client(
                "Compatible",
                url,
                api_key,
                AuthStyle::Bearer,
                client,
            )));
        }
        _ => {}
    }

    if let Some((display_name, default_url)) = compatible_provider_defaults(&name) {
        let auth = if name == "ollama" {
            AuthStyle::None
        } else {
            AuthStyle::Bearer
        };
        return Ok(Box::new(OpenAiCompatibleProvider::with_client(
            display_name,
            base_url.unwrap_or(default_url),
            api_key,
            auth,
            client,
        )));
    }

    anyhow::bail!(
        "Unknown provider: {name}. Supported providers: {}",
        SUPPORTED_PROVIDERS.join(", ")
    )
}
