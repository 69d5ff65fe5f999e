//! CLI module for citeline - command-line interface and subcommands.
//!
//! Provides the handbook question entry point plus the web research and
//! page summary flows.

pub mod commands;

pub use commands::Cli;
