//! Tool system for the decision loop
//!
//! Tools the model may call are a fixed enumeration (`ToolKind`). The
//! registry is built once at startup; a name that does not map to a
//! registered kind is rejected, never looked up dynamically.

mod registry;
mod search_handbook;

pub use registry::{ToolRegistry, decode_arguments};
pub use search_handbook::{HANDBOOK_MISSING, SearchHandbookTool};

use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Result;

/// Tool output starting with this reports a failure to the model instead of content
pub const TOOL_ERROR_PREFIX: &str = "ERROR:";

/// Every capability the model can be offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ToolKind {
    SearchHandbook,
}

impl ToolKind {
    pub const ALL: [ToolKind; 1] = [ToolKind::SearchHandbook];

    /// Name the model uses in tool calls
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::SearchHandbook => "search_handbook",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A tool that can be called by the LLM
#[async_trait]
pub trait Tool: Send + Sync {
    fn kind(&self) -> ToolKind;

    /// Human-readable description shown to the model
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Run the tool; the returned text is handed to the model verbatim
    async fn execute(&self, args: Map<String, Value>) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(ToolKind::from_name("read_file"), None);
        assert_eq!(ToolKind::from_name("Search_Handbook"), None);
        assert_eq!(ToolKind::from_name(""), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ToolKind::SearchHandbook.to_string(), "search_handbook");
    }
}
