//! Prompt Renderer - Render named templates with context variables using Handlebars

use handlebars::Handlebars;
use serde::Serialize;

use super::templates::BUILTIN;
use crate::error::{AgentError, Result};

/// Renders prompt templates using Handlebars templating
pub struct PromptRenderer {
    handlebars: Handlebars<'static>,
}

impl PromptRenderer {
    /// Create a renderer with every built-in template registered
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        // Prompts carry raw document text; never HTML-escape it
        handlebars.register_escape_fn(handlebars::no_escape);

        let mut renderer = Self { handlebars };
        for (name, template) in BUILTIN {
            renderer.register_template(name, template)?;
        }
        Ok(renderer)
    }

    /// Register a named template, replacing any previous one of that name
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| AgentError::Prompt(format!("Failed to register template '{}': {}", name, e)))
    }

    /// Render a registered template with any serializable context
    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(name, context)
            .map_err(|e| AgentError::Prompt(format!("Failed to render template '{}': {}", name, e)))
    }

    /// Check if a named template is registered
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.get_template(name).is_some()
    }
}
