//! Error types for citeline
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur while producing an answer
#[derive(Debug, Error)]
pub enum AgentError {
    /// Completion service failed or returned an unusable response
    #[error("Upstream call failed: {0}")]
    Upstream(String),

    /// Model output is not JSON or does not match the expected shape
    #[error("Schema validation failed: {0}")]
    SchemaValidation(String),

    /// Model requested a tool that is not registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Tool could not be executed with the supplied arguments
    #[error("Tool execution failed: {0}")]
    ToolExecution(String),

    /// Web page could not be fetched
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// Caller supplied an unusable query or URL
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Prompt template could not be rendered
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for citeline operations
pub type Result<T> = std::result::Result<T, AgentError>;
