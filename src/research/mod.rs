//! Single-shot research flows: page summaries and cited web research

mod fetch;
mod search;
mod summarize;

pub use fetch::{HttpPageFetcher, PageFetcher, html_to_text};
pub use search::{DEFAULT_QUERY, WebResearcher};
pub use summarize::{FETCH_PLACEHOLDER, PageSummarizer, parse_source_url};

use serde::{Deserialize, Serialize};

use crate::llm::CompletionRequest;

/// Page used by `summarize` when none is given
pub const DEFAULT_URL: &str =
    "https://www.europarl.europa.eu/topics/en/article/20230601STO93804/eu-ai-act-first-regulation-on-artificial-intelligence";

/// Settings shared by the research flows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchConfig {
    pub model: Option<String>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    /// Page text beyond this many characters is dropped before summarizing
    pub max_page_chars: Option<usize>,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.0,
            max_tokens: None,
            fetch_timeout_secs: 30,
            user_agent: concat!("citeline/", env!("CARGO_PKG_VERSION")).to_string(),
            max_page_chars: None,
        }
    }
}

impl ResearchConfig {
    /// Apply model, temperature and token settings to a request
    pub(crate) fn apply(&self, mut request: CompletionRequest) -> CompletionRequest {
        if let Some(model) = &self.model {
            request = request.with_model(model.clone());
        }
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        request.with_temperature(self.temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_research_config_default() {
        let config = ResearchConfig::default();
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.fetch_timeout_secs, 30);
        assert!(config.user_agent.starts_with("citeline/"));
        assert!(config.max_page_chars.is_none());
    }

    #[test]
    fn test_apply_sets_overrides() {
        let config = ResearchConfig {
            model: Some("llama-3.1-8b-instant".to_string()),
            max_tokens: Some(512),
            ..Default::default()
        };
        let request = config.apply(CompletionRequest::default());
        assert_eq!(request.model.as_deref(), Some("llama-3.1-8b-instant"));
        assert_eq!(request.max_tokens, Some(512));
        assert_eq!(request.temperature, Some(0.0));
    }

    #[test]
    fn test_default_url_is_valid() {
        assert!(parse_source_url(DEFAULT_URL).is_ok());
    }
}
