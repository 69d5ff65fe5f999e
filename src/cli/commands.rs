//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - ask: answer one handbook question
//! - search: cited web research query
//! - summarize: summarize a web page
//! - demo: run the example handbook questions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Citeline - cited answers from a policy handbook and the web
#[derive(Parser, Debug)]
#[command(name = "citeline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer a question from the policy handbook
    Ask {
        /// Question to answer
        query: String,
    },

    /// Answer a policy question with web citations
    Search {
        /// Research query (defaults to the Dutch public-sector AI policy question)
        query: Option<String>,
    },

    /// Summarize a web page
    Summarize {
        /// Page URL (defaults to the European Parliament AI Act article)
        url: Option<String>,

        /// Topic the summary should focus on
        #[arg(short, long)]
        focus: Option<String>,
    },

    /// Run the example handbook questions
    Demo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_no_args() {
        let cli = Cli::try_parse_from(["citeline"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.is_verbose());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["citeline", "-v", "--config", "/tmp/c.yml", "demo"]).unwrap();
        assert!(cli.is_verbose());
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.yml")));
        assert!(matches!(cli.command, Some(Commands::Demo)));
    }

    #[test]
    fn test_ask_command() {
        let cli = Cli::try_parse_from(["citeline", "ask", "What can you do?"]).unwrap();
        match cli.command {
            Some(Commands::Ask { query }) => assert_eq!(query, "What can you do?"),
            _ => panic!("Expected ask command"),
        }
    }

    #[test]
    fn test_ask_requires_query() {
        assert!(Cli::try_parse_from(["citeline", "ask"]).is_err());
    }

    #[test]
    fn test_search_command() {
        let cli = Cli::try_parse_from(["citeline", "search"]).unwrap();
        match cli.command {
            Some(Commands::Search { query }) => assert!(query.is_none()),
            _ => panic!("Expected search command"),
        }

        let cli = Cli::try_parse_from(["citeline", "search", "AI rules"]).unwrap();
        match cli.command {
            Some(Commands::Search { query }) => assert_eq!(query.as_deref(), Some("AI rules")),
            _ => panic!("Expected search command"),
        }
    }

    #[test]
    fn test_summarize_with_focus() {
        let cli = Cli::try_parse_from(["citeline", "summarize", "https://example.org", "-f", "risk tiers"]).unwrap();
        match cli.command {
            Some(Commands::Summarize { url, focus }) => {
                assert_eq!(url.as_deref(), Some("https://example.org"));
                assert_eq!(focus.as_deref(), Some("risk tiers"));
            }
            _ => panic!("Expected summarize command"),
        }
    }

    #[test]
    fn test_help_works() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_version_flag() {
        let result = Cli::try_parse_from(["citeline", "--version"]);
        assert!(result.is_err());
    }
}
