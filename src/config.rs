use citeline::agent::AgentConfig;
use citeline::llm::GroqConfig;
use citeline::prompt::PromptRenderer;
use citeline::research::ResearchConfig;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub llm: LlmConfig,
    pub handbook: HandbookConfig,
    pub agent: AgentConfig,
    pub research: ResearchConfig,
    /// Template overrides keyed by template name
    pub prompts: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub base_url: String,
    pub api_key_env: String,
    pub max_tokens: Option<u32>,
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        let groq = GroqConfig::default();
        Self {
            model: groq.model,
            base_url: groq.base_url,
            api_key_env: groq.api_key_env,
            max_tokens: groq.max_tokens,
            timeout_ms: 300000,
        }
    }
}

impl LlmConfig {
    pub fn to_groq(&self) -> GroqConfig {
        GroqConfig {
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            api_key_env: self.api_key_env.clone(),
            max_tokens: self.max_tokens,
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HandbookConfig {
    pub path: PathBuf,
}

impl Default for HandbookConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/handbook.md"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            llm: LlmConfig::default(),
            handbook: HandbookConfig::default(),
            agent: AgentConfig::default(),
            research: ResearchConfig::default(),
            prompts: HashMap::new(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let project_name = env!("CARGO_PKG_NAME");
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Reject settings that would make every call fail
    pub fn validate(&self) -> Result<()> {
        self.agent
            .citations
            .validate()
            .map_err(|e| eyre::eyre!("Invalid agent.citations: {}", e))
    }

    /// Built-in templates with any configured overrides applied
    pub fn prompt_renderer(&self) -> Result<PromptRenderer> {
        let mut renderer = PromptRenderer::new()?;
        for (name, template) in &self.prompts {
            if !renderer.has_template(name) {
                log::warn!("Ignoring override for unknown prompt template '{}'", name);
                continue;
            }
            renderer.register_template(name, template)?;
        }
        Ok(renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.handbook.path, PathBuf::from("data/handbook.md"));
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.llm.api_key_env, "GROQ_API_KEY");
        assert_eq!(config.agent.citations.min, 2);
        assert_eq!(config.agent.citations.max, 4);
        assert!(config.prompts.is_empty());
    }

    #[test]
    fn test_load_partial_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "llm:\n  model: llama-3.1-8b-instant\n  timeout_ms: 1000\nhandbook:\n  path: /srv/handbook.md\nagent:\n  citations:\n    min: 1\n    max: 3"
        )
        .unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.llm.model, "llama-3.1-8b-instant");
        assert_eq!(config.llm.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.handbook.path, PathBuf::from("/srv/handbook.md"));
        assert_eq!(config.agent.citations.min, 1);
        assert_eq!(config.agent.citations.max, 3);
        assert_eq!(config.research.fetch_timeout_secs, 30);

        let groq = config.llm.to_groq();
        assert_eq!(groq.timeout, Duration::from_millis(1000));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let path = PathBuf::from("/nonexistent/citeline.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "llm: [not, a, map").unwrap();
        assert!(Config::load(Some(&file.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_load_inverted_citation_bounds_fails() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "agent:\n  citations:\n    min: 5\n    max: 2").unwrap();

        let err = Config::load(Some(&file.path().to_path_buf())).unwrap_err();
        assert!(format!("{:?}", err).contains("min (5) exceeds max (2)"));
    }

    #[test]
    fn test_prompt_overrides() {
        let mut config = Config::default();
        config
            .prompts
            .insert("summary_system".to_string(), "Summarize tersely.".to_string());
        config.prompts.insert("no_such_template".to_string(), "ignored".to_string());

        let renderer = config.prompt_renderer().unwrap();
        let rendered = renderer.render("summary_system", &serde_json::json!({})).unwrap();
        assert_eq!(rendered, "Summarize tersely.");
        assert!(!renderer.has_template("no_such_template"));
    }
}
