// ── Infrastructure ───────────────────────────────────────────────────────────
pub mod http_client;
pub mod scrub;
pub mod traits;

// ── Provider implementations ────────────────────────────────────────────────
pub mod compatible;
pub mod factory;
pub mod gemini;

pub use compatible::{AuthStyle, OpenAiCompatibleProvider};
pub use factory::{SUPPORTED_PROVIDERS, create_provider, resolve_api_key};
pub use gemini::GeminiProvider;
pub use http_client::{build_provider_client, build_provider_client_with_timeout};
pub use scrub::{api_error, sanitize_api_error, scrub_secret_patterns};
pub use traits::Provider;
