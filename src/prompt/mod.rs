//! Prompt System - named templates rendered with Handlebars
//!
//! Every system instruction the crate sends is a template here, so
//! configuration can replace any of them by name.

mod render;
pub mod templates;

pub use render::PromptRenderer;
