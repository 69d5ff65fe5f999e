//! LLM Client Layer - chat-completions integration
//!
//! This module provides:
//! - Message types for LLM communication
//! - LlmClient trait for API abstraction
//! - GroqClient implementation
//! - MockLlmClient for scripted tests

pub mod client;
pub mod groq;
pub mod types;

pub use client::{LlmClient, MockLlmClient};
pub use groq::{GroqClient, GroqConfig};
pub use types::{
    CompletionRequest, CompletionResponse, FinishReason, Message, ResponseFormat, Role, ToolCall, ToolChoice,
    ToolDefinition, Usage,
};
