//! Tool registry - manages tool registration and execution

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::debug;

use super::{SearchHandbookTool, Tool, ToolKind};
use crate::error::{AgentError, Result};
use crate::llm::{ToolCall, ToolDefinition};

/// Tools offered to the model for one process
pub struct ToolRegistry {
    tools: BTreeMap<ToolKind, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { tools: BTreeMap::new() }
    }

    /// Create a registry with the handbook lookup tool
    pub fn standard(handbook_path: impl Into<PathBuf>) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SearchHandbookTool::new(handbook_path)));
        registry
    }

    /// Add a tool, replacing any tool of the same kind
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.insert(tool.kind(), tool);
    }

    pub fn has_tool(&self, kind: ToolKind) -> bool {
        self.tools.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get tool definitions for the LLM, in `ToolKind` order
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|t| ToolDefinition::new(t.kind().name(), t.description(), t.input_schema()))
            .collect()
    }

    /// Resolve a tool name requested by the model
    pub fn resolve(&self, name: &str) -> Result<&dyn Tool> {
        ToolKind::from_name(name)
            .and_then(|kind| self.tools.get(&kind))
            .map(|tool| tool.as_ref())
            .ok_or_else(|| AgentError::UnknownTool(name.to_string()))
    }

    /// Execute a tool call, returning the text handed back to the model
    pub async fn execute(&self, call: &ToolCall) -> Result<String> {
        let tool = self.resolve(&call.name)?;
        let args = decode_arguments(call)?;
        validate_required(&tool.input_schema(), &call.name, &args)?;

        debug!(tool = %call.name, call_id = %call.id, "Executing tool");
        tool.execute(args).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a call's JSON argument string into a key-value map
pub fn decode_arguments(call: &ToolCall) -> Result<Map<String, Value>> {
    if call.arguments.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str::<Value>(&call.arguments) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(AgentError::ToolExecution(format!(
            "arguments for '{}' must be a JSON object, got {}",
            call.name, other
        ))),
        Err(e) => Err(AgentError::ToolExecution(format!(
            "arguments for '{}' are not valid JSON: {}",
            call.name, e
        ))),
    }
}

/// Check that all required fields of the schema are present
fn validate_required(schema: &Value, tool: &str, args: &Map<String, Value>) -> Result<()> {
    if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
        for field in required.iter().filter_map(|r| r.as_str()) {
            if !args.contains_key(field) {
                return Err(AgentError::ToolExecution(format!(
                    "Tool '{}' missing required field: {}",
                    tool, field
                )));
            }
        }
    }
    Ok(())
}
