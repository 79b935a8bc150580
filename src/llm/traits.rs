use std::future::Future;
use std::pin::Pin;

/// A text-completion backend: one prompt in, generated text out.
pub trait Provider: Send + Sync {
    /// Provider identifier (e.g. "gemini", "openai").
    fn name(&self) -> &str;

    fn chat<'a>(
        &'a self,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;

    /// Sends `system_prompt` ahead of `message` in the same user turn.
    fn chat_with_system<'a>(
        &'a self,
        system_prompt: Option<&'a str>,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            match system_prompt.map(str::trim).filter(|s| !s.is_empty()) {
                Some(system) => {
                    let combined = format!("{system}\n\n{message}");
                    self.chat(&combined, model, temperature).await
                }
                None => self.chat(message, model, temperature).await,
            }
        })
    }
}
