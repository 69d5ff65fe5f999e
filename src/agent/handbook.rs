//! Handbook agent - the tool-calling decision loop.
//!
//! The model first sees the question together with the registered tools and
//! decides whether it needs the handbook. Either way the answer is produced
//! by a second, schema-constrained completion:
//!
//! 1. Seed the conversation with the user query
//! 2. Ask the model, offering tools with `tool_choice = auto`
//! 3. No tool requested: ask again for a direct answer with empty citations
//! 4. Tools requested: run each one, append its output, ask for a cited answer
//!
//! Nothing is retried; the first failure aborts the call.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::answer::{CitationBounds, HandbookAnswer};
use crate::error::{AgentError, Result};
use crate::llm::{CompletionRequest, LlmClient, Message, ToolChoice};
use crate::prompt::PromptRenderer;
use crate::prompt::templates::{HANDBOOK_CITED, HANDBOOK_DIRECT, HANDBOOK_SYSTEM};
use crate::schema::complete_structured;
use crate::tools::{TOOL_ERROR_PREFIX, ToolKind, ToolRegistry};

/// Configuration for the HandbookAgent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Model override; the client's default when unset
    pub model: Option<String>,
    /// Temperature for the structured answer
    pub temperature: f32,
    /// Maximum tokens for LLM responses
    pub max_tokens: Option<u32>,
    /// Citation count accepted from a tool-backed answer
    pub citations: CitationBounds,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.0,
            max_tokens: None,
            citations: CitationBounds::default(),
        }
    }
}

/// Answers handbook questions, consulting the handbook only when the model asks for it.
pub struct HandbookAgent<L: LlmClient> {
    llm: Arc<L>,
    tools: ToolRegistry,
    prompts: Arc<PromptRenderer>,
    config: AgentConfig,
}

impl<L: LlmClient> HandbookAgent<L> {
    pub fn new(llm: Arc<L>, tools: ToolRegistry, prompts: Arc<PromptRenderer>) -> Self {
        Self::with_config(llm, tools, prompts, AgentConfig::default())
    }

    pub fn with_config(llm: Arc<L>, tools: ToolRegistry, prompts: Arc<PromptRenderer>, config: AgentConfig) -> Self {
        Self {
            llm,
            tools,
            prompts,
            config,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Answer one question.
    pub async fn answer(&self, query: &str) -> Result<HandbookAnswer> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AgentError::InvalidInput("query must not be empty".to_string()));
        }

        let base = self.base_prompt()?;
        let mut conversation = vec![Message::user(query)];

        let request = self
            .request(&base, &conversation)
            .with_tools(self.tools.definitions(), ToolChoice::Auto);
        let initial = self.llm.complete(request).await?;

        if !initial.requests_tools() {
            info!("No tool call needed, responding directly");
            let system = self.prompts.render(HANDBOOK_DIRECT, &json!({ "base": base }))?;
            let answer: HandbookAnswer = self.structured(&system, &conversation).await?;
            if !answer.citations.is_empty() {
                return Err(AgentError::SchemaValidation(format!(
                    "direct answer must not carry citations, got {}",
                    answer.citations.len()
                )));
            }
            return Ok(answer);
        }

        // Every requested tool must be registered before any of them runs
        for call in &initial.tool_calls {
            self.tools.resolve(&call.name)?;
        }

        conversation.push(Message::assistant_tool_calls(
            initial.content.clone(),
            initial.tool_calls.clone(),
        ));

        let mut lookup_failed = false;
        for call in &initial.tool_calls {
            info!(tool = %call.name, call_id = %call.id, "Tool called");
            let output = self.tools.execute(call).await?;
            lookup_failed |= output.starts_with(TOOL_ERROR_PREFIX);
            conversation.push(Message::tool(&call.id, &call.name, output));
        }

        info!(tool_results = initial.tool_calls.len(), "Generating final structured answer");
        let bounds = self.config.citations;
        let system = self.prompts.render(
            HANDBOOK_CITED,
            &json!({ "base": base, "min": bounds.min, "max": bounds.max }),
        )?;
        let answer: HandbookAnswer = self.structured(&system, &conversation).await?;

        // A failed lookup leaves nothing to cite; the count is only enforced over real content
        match bounds.check(answer.citations.len()) {
            Ok(()) => {}
            Err(reason) if lookup_failed => {
                warn!(reason = %reason, "Accepting answer after failed lookup");
            }
            Err(reason) => return Err(AgentError::SchemaValidation(reason)),
        }

        Ok(answer)
    }

    fn base_prompt(&self) -> Result<String> {
        self.prompts
            .render(HANDBOOK_SYSTEM, &json!({ "tool": ToolKind::SearchHandbook.name() }))
    }

    /// Request over `[system, conversation...]`
    fn request(&self, system: &str, conversation: &[Message]) -> CompletionRequest {
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(Message::system(system));
        messages.extend_from_slice(conversation);

        let mut request = CompletionRequest::new(messages);
        if let Some(model) = &self.config.model {
            request = request.with_model(model.clone());
        }
        if let Some(max_tokens) = self.config.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        request
    }

    async fn structured(&self, system: &str, conversation: &[Message]) -> Result<HandbookAnswer> {
        let request = self
            .request(system, conversation)
            .with_temperature(self.config.temperature);
        complete_structured(self.llm.as_ref(), request).await
    }
}
