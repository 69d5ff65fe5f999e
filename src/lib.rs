//! Citeline - structured, cited answers from a hosted LLM
//!
//! Citeline drives an OpenAI-compatible chat-completions service through a
//! single tool-calling decision loop: the model decides whether it needs the
//! policy handbook, and the final answer is always parsed and validated
//! against a typed schema. Two single-shot flows sit alongside it, a web page
//! summarizer and a cited web research query.

pub mod agent;
pub mod answer;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod research;
pub mod schema;
pub mod tools;

pub use error::{AgentError, Result};
