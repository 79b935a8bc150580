use crate::error::PromptError;
use std::error::Error as _;
use tera::Tera;

/// Tera-backed template engine for building structured prompts.
pub struct TeraEngine {
    tera: Tera,
}

impl TeraEngine {
    /// Create with inline templates (no filesystem).
    pub fn new() -> Self {
        Self {
            tera: Tera::default(),
        }
    }

    /// Register a template from a string.
    pub fn add_template(&mut self, name: &str, content: &str) -> Result<(), PromptError> {
        self.tera
            .add_raw_template(name, content)
            .map_err(|e| PromptError::Render(describe(&e)))
    }

    /// Render a named template with the given context.
    pub fn render(&self, template_name: &str, context: &tera::Context) -> Result<String, PromptError> {
        self.tera
            .render(template_name, context)
            .map_err(|e| PromptError::Render(describe(&e)))
    }
}

impl Default for TeraEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Tera nests the useful message in the error source chain.
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
