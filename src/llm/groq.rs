//! Groq API client implementation
//!
//! Implements the LlmClient trait for Groq's OpenAI-compatible
//! chat-completions endpoint. Any OpenAI-compatible server works by pointing
//! `base_url` at it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{AgentError, Result};
use crate::llm::client::LlmClient;
use crate::llm::types::{CompletionRequest, CompletionResponse, FinishReason, Message, ToolCall, Usage};

/// Groq OpenAI-compatible base URL
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model to use
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Configuration for the Groq client
#[derive(Debug, Clone)]
pub struct GroqConfig {
    pub model: String,
    pub base_url: String,
    pub api_key_env: String,
    pub max_tokens: Option<u32>,
    pub timeout: Duration,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            max_tokens: None,
            timeout: Duration::from_secs(300),
        }
    }
}

impl GroqConfig {
    /// Create a new config with a specific model
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }
}

/// Groq chat-completions client
pub struct GroqClient {
    client: Client,
    api_key: String,
    config: GroqConfig,
    usage: Arc<Mutex<Usage>>,
}

impl GroqClient {
    /// Create a new Groq client
    ///
    /// Reads the API key from the environment variable named in the config
    pub fn new(config: GroqConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| AgentError::Upstream(format!("{} not set", config.api_key_env)))?;

        Self::with_api_key(api_key, config)
    }

    /// Create a client with an explicit API key
    pub fn with_api_key(api_key: String, config: GroqConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AgentError::Upstream(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            config,
            usage: Arc::new(Mutex::new(Usage::default())),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Build the request body for the chat-completions API
    fn build_request(&self, request: &CompletionRequest) -> Value {
        let model = request.model.as_ref().unwrap_or(&self.config.model).clone();

        let messages: Vec<Value> = request.messages.iter().map(message_to_json).collect();

        let mut body = json!({
            "model": model,
            "messages": messages
        });

        if let Some(max_tokens) = request.max_tokens.or(self.config.max_tokens) {
            body["max_tokens"] = json!(max_tokens);
        }

        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }

        if !request.tools.is_empty() {
            let tools: Vec<Value> = request.tools.iter().map(|t| t.to_openai_schema()).collect();
            body["tools"] = json!(tools);
            if let Some(choice) = request.tool_choice {
                body["tool_choice"] = json!(choice.as_str());
            }
        }

        if let Some(format) = &request.response_format {
            body["response_format"] = format.to_openai_schema();
        }

        body
    }

    /// Parse the API response into a CompletionResponse
    fn parse_response(&self, body: Value) -> Result<CompletionResponse> {
        let choice = body["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .ok_or_else(|| AgentError::Upstream("No choices in response".to_string()))?;

        let finish_reason = FinishReason::parse(choice["finish_reason"].as_str());

        let usage = if let Some(u) = body.get("usage") {
            Usage::new(
                u["prompt_tokens"].as_u64().unwrap_or(0),
                u["completion_tokens"].as_u64().unwrap_or(0),
            )
        } else {
            Usage::default()
        };

        // Track cumulative usage
        {
            let mut total = self.usage.lock().unwrap_or_else(|e| e.into_inner());
            total.add(&usage);
        }

        let message = &choice["message"];
        let content = message["content"].as_str().map(str::to_string);

        let mut tool_calls = Vec::new();
        if let Some(calls) = message["tool_calls"].as_array() {
            for call in calls {
                // Tool results are matched back by id, so a call without one is unusable
                let id = call["id"]
                    .as_str()
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| AgentError::Upstream("Tool call in response has no id".to_string()))?
                    .to_string();
                let name = call["function"]["name"].as_str().unwrap_or("").to_string();
                // Arguments arrive as a JSON string; some servers send an object instead
                let arguments = match &call["function"]["arguments"] {
                    Value::String(s) => s.clone(),
                    Value::Null => "{}".to_string(),
                    other => other.to_string(),
                };
                tool_calls.push(ToolCall::new(id, name, arguments));
            }
        }

        Ok(CompletionResponse {
            content,
            tool_calls,
            finish_reason,
            usage,
        })
    }

    /// Send a request to the chat-completions API
    async fn send_request(&self, body: Value) -> Result<Value> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::Upstream(format!("Request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AgentError::Upstream(format!("API error {}: {}", status, error_body)));
        }

        response
            .json()
            .await
            .map_err(|e| AgentError::Upstream(format!("Failed to parse response: {}", e)))
    }

    /// Get cumulative token usage
    pub fn total_usage(&self) -> Usage {
        self.usage.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Map one conversation message onto the wire format
fn message_to_json(message: &Message) -> Value {
    let mut value = json!({
        "role": message.role.as_str(),
        "content": message.content
    });

    if !message.tool_calls.is_empty() {
        let calls: Vec<Value> = message
            .tool_calls
            .iter()
            .map(|c| {
                json!({
                    "id": c.id,
                    "type": "function",
                    "function": {
                        "name": c.name,
                        "arguments": c.arguments
                    }
                })
            })
            .collect();
        value["tool_calls"] = json!(calls);
    }

    if let Some(id) = &message.tool_call_id {
        value["tool_call_id"] = json!(id);
    }

    if let Some(name) = &message.name {
        value["name"] = json!(name);
    }

    value
}

#[async_trait]
impl LlmClient for GroqClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = self.build_request(&request);
        debug!(
            model = %body["model"],
            messages = request.messages.len(),
            tools = request.tools.len(),
            structured = request.response_format.is_some(),
            "Sending completion request"
        );
        let response = self.send_request(body).await?;
        self.parse_response(response)
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn is_ready(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl std::fmt::Debug for GroqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqClient")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}
