//! Structured output - schema generation and parse-then-validate
//!
//! Model output is never trusted directly: it is parsed as JSON, deserialized
//! into a typed value (unknown fields rejected), then checked with the type's
//! own validation rules. Any failure is a `SchemaValidation` error.

use schemars::JsonSchema;
use schemars::schema_for;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AgentError, Result};
use crate::llm::{CompletionRequest, CompletionResponse, FinishReason, LlmClient, ResponseFormat};

/// A type the model can be asked to produce as JSON
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Semantic checks beyond what the schema expresses
    fn validate(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

/// JSON schema for `T`
pub fn json_schema<T: JsonSchema>() -> Result<Value> {
    Ok(serde_json::to_value(schema_for!(T))?)
}

/// Response format constraining the model to `T`'s schema
pub fn response_format<T: StructuredOutput>() -> Result<ResponseFormat> {
    Ok(ResponseFormat::json_schema(json_schema::<T>()?))
}

/// Text content of a response.
///
/// A response without content, or one cut off at the token limit, is an
/// upstream failure rather than malformed output.
pub fn response_content(response: &CompletionResponse) -> Result<&str> {
    if response.finish_reason == FinishReason::Length {
        return Err(AgentError::Upstream(
            "Completion truncated at the token limit".to_string(),
        ));
    }

    response
        .content
        .as_deref()
        .ok_or_else(|| AgentError::Upstream("Completion returned no content".to_string()))
}

/// Parse and validate model output into `T`
pub fn parse_structured<T: StructuredOutput>(content: &str) -> Result<T> {
    let value: Value = serde_json::from_str(content.trim())
        .map_err(|e| AgentError::SchemaValidation(format!("response is not valid JSON: {}", e)))?;

    let parsed: T = serde_json::from_value(value)
        .map_err(|e| AgentError::SchemaValidation(format!("response does not match schema: {}", e)))?;

    parsed.validate().map_err(AgentError::SchemaValidation)?;

    Ok(parsed)
}

/// Send `request` constrained to `T`'s schema and parse the reply
pub async fn complete_structured<L, T>(llm: &L, request: CompletionRequest) -> Result<T>
where
    L: LlmClient + ?Sized,
    T: StructuredOutput,
{
    let request = request.with_response_format(response_format::<T>()?);
    let response = llm.complete(request).await?;
    parse_structured(response_content(&response)?)
}

/// `Err` with `message` when `value` is blank
pub(crate) fn require_text(value: &str, message: &str) -> std::result::Result<(), String> {
    if value.trim().is_empty() {
        Err(message.to_string())
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, JsonSchema)]
    #[serde(deny_unknown_fields)]
    struct Probe {
        name: String,
    }

    impl StructuredOutput for Probe {
        fn validate(&self) -> std::result::Result<(), String> {
            require_text(&self.name, "name must not be empty")
        }
    }

    #[test]
    fn test_json_schema_lists_properties() {
        let schema = json_schema::<Probe>().unwrap();
        assert!(schema["properties"]["name"].is_object());
        assert_eq!(schema["required"][0], "name");
    }

    #[test]
    fn test_response_format_wraps_schema() {
        let format = response_format::<Probe>().unwrap();
        assert_eq!(format.to_openai_schema()["type"], "json_object");
        assert!(format.schema["properties"]["name"].is_object());
    }

    #[test]
    fn test_parse_valid() {
        let probe: Probe = parse_structured(r#" {"name": "ok"} "#).unwrap();
        assert_eq!(probe.name, "ok");
    }

    #[test]
    fn test_parse_not_json() {
        let result = parse_structured::<Probe>("Sure! Here is the answer.");
        assert!(matches!(result, Err(AgentError::SchemaValidation(msg)) if msg.contains("not valid JSON")));
    }

    #[test]
    fn test_parse_wrong_shape() {
        let result = parse_structured::<Probe>(r#"{"title": "x"}"#);
        assert!(matches!(result, Err(AgentError::SchemaValidation(msg)) if msg.contains("does not match")));
    }

    #[test]
    fn test_parse_fails_validation() {
        let result = parse_structured::<Probe>(r#"{"name": "  "}"#);
        assert!(matches!(result, Err(AgentError::SchemaValidation(msg)) if msg == "name must not be empty"));
    }

    #[tokio::test]
    async fn test_complete_structured_attaches_schema() {
        let mock = crate::llm::MockLlmClient::new(vec![CompletionResponse::text(r#"{"name": "ok"}"#)]);

        let probe: Probe = complete_structured(&mock, CompletionRequest::default()).await.unwrap();

        assert_eq!(probe.name, "ok");
        let sent = &mock.requests()[0];
        let format = sent.response_format.as_ref().unwrap();
        assert!(format.schema["properties"]["name"].is_object());
    }

    #[test]
    fn test_response_content_missing() {
        let response = CompletionResponse::default();
        assert!(matches!(response_content(&response), Err(AgentError::Upstream(_))));

        let response = CompletionResponse::text("{}");
        assert_eq!(response_content(&response).unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_truncated_completion_is_upstream_error() {
        let truncated = CompletionResponse {
            finish_reason: FinishReason::Length,
            ..CompletionResponse::text(r#"{"name": "o"#)
        };
        let mock = crate::llm::MockLlmClient::new(vec![truncated]);

        let result = complete_structured::<_, Probe>(&mock, CompletionRequest::default()).await;
        assert!(matches!(result, Err(AgentError::Upstream(msg)) if msg.contains("truncated")));
    }
}
