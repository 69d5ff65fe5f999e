//! search_handbook tool - hand the whole handbook to the model

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::{TOOL_ERROR_PREFIX, Tool, ToolKind};
use crate::error::Result;

/// Returned in place of the handbook when the file does not exist
pub const HANDBOOK_MISSING: &str = "ERROR: Handbook file not found at expected path.";

/// Retrieves the AI implementation handbook.
///
/// The query is accepted but not used: the full document is returned and the
/// model picks the relevant sections itself.
pub struct SearchHandbookTool {
    path: PathBuf,
}

impl SearchHandbookTool {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl Tool for SearchHandbookTool {
    fn kind(&self) -> ToolKind {
        ToolKind::SearchHandbook
    }

    fn description(&self) -> &'static str {
        "Retrieve the AI implementation handbook content. Use this when the user asks questions about AI \
         implementation requirements, regulations, or procedures for Dutch government organizations."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The user's question or search query."
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, _args: Map<String, Value>) -> Result<String> {
        // Missing or unreadable handbooks are reported to the model, not raised
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            warn!(path = %self.path.display(), "Handbook not found");
            return Ok(HANDBOOK_MISSING.to_string());
        }

        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                info!(chars = content.chars().count(), "Handbook retrieved");
                Ok(content)
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Handbook unreadable");
                Ok(format!("{} Could not read handbook file: {}", TOOL_ERROR_PREFIX, e))
            }
        }
    }
}
