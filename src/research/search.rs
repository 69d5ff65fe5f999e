//! Web researcher - answer a policy query with URL citations

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use super::ResearchConfig;
use crate::answer::SearchResult;
use crate::error::{AgentError, Result};
use crate::llm::{CompletionRequest, LlmClient, Message};
use crate::prompt::PromptRenderer;
use crate::prompt::templates::RESEARCH_SYSTEM;
use crate::schema::complete_structured;

/// Query used when none is given
pub const DEFAULT_QUERY: &str = "What are the current policies and regulations regarding AI implementation in Dutch \
government services, and what are the key requirements for public sector AI adoption? Use official Dutch government \
websites like rijksoverheid.nl, tweedekamer.nl, and cbs.nl as sources.";

pub struct WebResearcher<L: LlmClient> {
    llm: Arc<L>,
    prompts: Arc<PromptRenderer>,
    config: ResearchConfig,
}

impl<L: LlmClient> WebResearcher<L> {
    pub fn new(llm: Arc<L>, prompts: Arc<PromptRenderer>, config: ResearchConfig) -> Self {
        Self { llm, prompts, config }
    }

    pub async fn search(&self, query: &str) -> Result<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AgentError::InvalidInput("query must not be empty".to_string()));
        }

        let system = self.prompts.render(RESEARCH_SYSTEM, &json!({}))?;
        let request = self
            .config
            .apply(CompletionRequest::new(vec![Message::system(system), Message::user(query)]));

        info!(model = %self.llm.model(), "Executing research query");
        complete_structured(self.llm.as_ref(), request).await
    }
}
