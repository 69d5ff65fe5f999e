//! Agents that answer questions with structured, cited output

mod handbook;

pub use handbook::{AgentConfig, HandbookAgent};
