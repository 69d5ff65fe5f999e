//! Answer shapes the model is asked to produce

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::schema::{StructuredOutput, require_text};

/// A specific text excerpt and the section it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct HandbookCitation {
    /// A brief text excerpt from the handbook.
    pub text: String,
    /// The section number (e.g., '2.1', '3.2').
    pub section: String,
}

/// The final, comprehensive answer supported by citations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct HandbookAnswer {
    /// The clear, comprehensive answer to the user's question.
    pub answer: String,
    /// A list of 2-4 key citations from the handbook content.
    pub citations: Vec<HandbookCitation>,
}

impl StructuredOutput for HandbookAnswer {
    fn validate(&self) -> Result<(), String> {
        require_text(&self.answer, "answer must not be empty")?;
        for (i, citation) in self.citations.iter().enumerate() {
            require_text(&citation.text, &format!("citation {} has an empty excerpt", i + 1))?;
            require_text(&citation.section, &format!("citation {} has an empty section", i + 1))?;
        }
        Ok(())
    }
}

/// A specific text excerpt and its source URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct WebCitation {
    pub text: String,
    pub url: String,
}

/// The final answer and a list of supporting citations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SearchResult {
    pub answer: String,
    pub citations: Vec<WebCitation>,
}

impl StructuredOutput for SearchResult {
    fn validate(&self) -> Result<(), String> {
        require_text(&self.answer, "answer must not be empty")?;
        for (i, citation) in self.citations.iter().enumerate() {
            require_text(&citation.text, &format!("citation {} has an empty excerpt", i + 1))?;
            url::Url::parse(citation.url.trim())
                .map_err(|e| format!("citation {} has an invalid url '{}': {}", i + 1, citation.url, e))?;
        }
        Ok(())
    }
}

/// A model to hold the summarized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Summary {
    pub summary: String,
}

impl StructuredOutput for Summary {
    fn validate(&self) -> Result<(), String> {
        require_text(&self.summary, "summary must not be empty")
    }
}

/// Inclusive bounds on the number of citations a tool-backed answer may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CitationBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for CitationBounds {
    fn default() -> Self {
        Self { min: 2, max: 4 }
    }
}

impl CitationBounds {
    /// Bounds that no count could satisfy are a configuration error
    pub fn validate(&self) -> Result<(), String> {
        if self.min > self.max {
            Err(format!(
                "citation bounds min ({}) exceeds max ({})",
                self.min, self.max
            ))
        } else {
            Ok(())
        }
    }

    pub fn check(&self, count: usize) -> Result<(), String> {
        if count < self.min || count > self.max {
            Err(format!(
                "expected {}-{} citations, got {}",
                self.min, self.max, count
            ))
        } else {
            Ok(())
        }
    }
}
