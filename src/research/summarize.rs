//! Page summarizer - fetch a web page and summarize it as structured output

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};
use url::Url;

use super::ResearchConfig;
use crate::answer::Summary;
use crate::error::{AgentError, Result};
use crate::llm::{CompletionRequest, LlmClient, Message};
use crate::prompt::PromptRenderer;
use crate::prompt::templates::{SUMMARY_REQUEST, SUMMARY_SYSTEM};
use crate::research::fetch::PageFetcher;
use crate::schema::complete_structured;

/// Summarized in place of the page when it cannot be fetched
pub const FETCH_PLACEHOLDER: &str = "Failed to extract content.";

pub struct PageSummarizer<L: LlmClient, F: PageFetcher> {
    llm: Arc<L>,
    fetcher: F,
    prompts: Arc<PromptRenderer>,
    config: ResearchConfig,
}

impl<L: LlmClient, F: PageFetcher> PageSummarizer<L, F> {
    pub fn new(llm: Arc<L>, fetcher: F, prompts: Arc<PromptRenderer>, config: ResearchConfig) -> Self {
        Self {
            llm,
            fetcher,
            prompts,
            config,
        }
    }

    /// Summarize the page at `url`, optionally steering toward `focus`.
    ///
    /// A page that cannot be fetched is logged and replaced by a placeholder;
    /// only the completion itself can fail the call.
    pub async fn summarize(&self, url: &str, focus: Option<&str>) -> Result<Summary> {
        let url = parse_source_url(url)?;
        info!(url = %url, "Fetching and converting content");

        let content = match self.fetcher.fetch(&url).await {
            Ok(content) => truncate_chars(content, self.config.max_page_chars),
            Err(e) => {
                warn!(url = %url, error = %e, "Error converting document");
                FETCH_PLACEHOLDER.to_string()
            }
        };

        let system = self.prompts.render(SUMMARY_SYSTEM, &json!({}))?;
        let user = self
            .prompts
            .render(SUMMARY_REQUEST, &json!({ "content": content, "focus": focus }))?;

        let request = self
            .config
            .apply(CompletionRequest::new(vec![Message::system(system), Message::user(user)]));

        info!("Generating summary");
        complete_structured(self.llm.as_ref(), request).await
    }
}

/// Accept only absolute http(s) URLs
pub fn parse_source_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| AgentError::InvalidInput(format!("invalid URL '{}': {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AgentError::InvalidInput(format!(
            "unsupported URL scheme '{}' in '{}'",
            other, raw
        ))),
    }
}

fn truncate_chars(content: String, limit: Option<usize>) -> String {
    match limit {
        Some(limit) if content.chars().count() > limit => content.chars().take(limit).collect(),
        _ => content,
    }
}
