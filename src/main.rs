use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use citeline::agent::HandbookAgent;
use citeline::answer::HandbookAnswer;
use citeline::llm::{GroqClient, LlmClient};
use citeline::prompt::PromptRenderer;
use citeline::research::{DEFAULT_QUERY, DEFAULT_URL, HttpPageFetcher, PageSummarizer, WebResearcher};
use citeline::tools::ToolRegistry;

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

const EXAMPLE_QUERIES: [&str; 3] = [
    "What can you do?",
    "What are the requirements for registering an AI system in the Algorithm Register?",
    "Do I need to perform an IAMA for a chatbot that answers citizen questions?",
];

const DEFAULT_FOCUS: &str = "the EU AI Act";

fn setup_logging(level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("citeline")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("citeline.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG wins over the configured level
    let env = env_logger::Env::default().default_filter_or(level.unwrap_or("info"));
    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// Shared pieces every flow needs
struct App {
    config: Config,
    llm: Arc<GroqClient>,
    prompts: Arc<PromptRenderer>,
}

impl App {
    fn new(config: Config) -> Result<Self> {
        let llm = GroqClient::new(config.llm.to_groq()).context("Failed to create LLM client")?;
        if !llm.is_ready() {
            return Err(eyre::eyre!("{} is set but empty", config.llm.api_key_env));
        }
        let prompts = config.prompt_renderer().context("Failed to load prompt templates")?;

        Ok(Self {
            config,
            llm: Arc::new(llm),
            prompts: Arc::new(prompts),
        })
    }

    fn handbook_agent(&self) -> HandbookAgent<GroqClient> {
        HandbookAgent::with_config(
            self.llm.clone(),
            ToolRegistry::standard(self.config.handbook.path.clone()),
            self.prompts.clone(),
            self.config.agent.clone(),
        )
    }
}

async fn run_application(cli: &Cli, app: &App) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
        println!("  Model: {}", app.config.llm.model);
        println!("  Handbook: {}", app.config.handbook.path.display());
    }

    match &cli.command {
        None | Some(Commands::Demo) => handle_demo_command(app).await,
        Some(Commands::Ask { query }) => handle_ask_command(query, app).await,
        Some(Commands::Search { query }) => handle_search_command(query.as_deref(), app).await,
        Some(Commands::Summarize { url, focus }) => {
            handle_summarize_command(url.as_deref(), focus.as_deref(), app).await
        }
    }?;

    if cli.is_verbose() {
        let usage = app.llm.total_usage();
        println!(
            "\n{} {} prompt + {} completion = {} tokens",
            "Usage:".yellow(),
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total()
        );
    }

    Ok(())
}

async fn handle_ask_command(query: &str, app: &App) -> Result<()> {
    info!("Answering handbook query: {}", query);
    let answer = app
        .handbook_agent()
        .answer(query)
        .await
        .context("Failed to answer query")?;
    print_handbook_answer(&answer);
    Ok(())
}

async fn handle_demo_command(app: &App) -> Result<()> {
    let agent = app.handbook_agent();
    let separator = "=".repeat(60);

    for query in EXAMPLE_QUERIES {
        println!("\n{}", separator);
        println!("{} {}", "Query:".cyan().bold(), query);
        println!("{}\n", separator);

        match agent.answer(query).await {
            Ok(answer) => print_handbook_answer(&answer),
            Err(e) => {
                log::error!("Query failed: {}", e);
                println!("{} {}", "Error:".red().bold(), e);
            }
        }
    }
    Ok(())
}

async fn handle_search_command(query: Option<&str>, app: &App) -> Result<()> {
    let query = query.unwrap_or(DEFAULT_QUERY);
    info!("Running web research query");
    println!("{} {}\n", "Query:".cyan().bold(), query);

    let researcher = WebResearcher::new(app.llm.clone(), app.prompts.clone(), app.config.research.clone());
    let result = researcher.search(query).await.context("Research query failed")?;

    let json = serde_json::to_string_pretty(&result).context("Failed to format result")?;
    println!("{}", json);
    Ok(())
}

async fn handle_summarize_command(url: Option<&str>, focus: Option<&str>, app: &App) -> Result<()> {
    // The default page comes with its default focus
    let (url, focus) = match url {
        Some(url) => (url, focus),
        None => (DEFAULT_URL, focus.or(Some(DEFAULT_FOCUS))),
    };
    info!("Summarizing page: {}", url);
    println!("{} {}\n", "Summarizing:".cyan().bold(), url);

    let research = &app.config.research;
    let fetcher = HttpPageFetcher::new(Duration::from_secs(research.fetch_timeout_secs), &research.user_agent)
        .context("Failed to create page fetcher")?;
    let summarizer = PageSummarizer::new(app.llm.clone(), fetcher, app.prompts.clone(), research.clone());

    let summary = summarizer.summarize(url, focus).await.context("Failed to summarize page")?;
    println!("{}", summary.summary);
    Ok(())
}

fn print_handbook_answer(answer: &HandbookAnswer) {
    println!("{} {}\n", "Answer:".green().bold(), answer.answer);

    if answer.citations.is_empty() {
        println!("{}", "Citations: None (Direct response or no relevant policy found)".dimmed());
        return;
    }

    println!("{}", "Citations:".green());
    for citation in &answer.citations {
        let excerpt: String = citation.text.chars().take(100).collect();
        println!("  Section {}: {}...", citation.section, excerpt);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(config.log_level.as_deref()).context("Failed to setup logging")?;
    info!("Starting with config from: {:?}", cli.config);

    let app = App::new(config)?;

    // Run the main application logic
    run_application(&cli, &app).await.context("Application failed")?;

    Ok(())
}
