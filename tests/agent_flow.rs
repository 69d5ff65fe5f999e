//! Handbook agent integration tests
//!
//! Drives the full decision loop against a scripted LLM and a real handbook
//! file on disk.

use std::fs;
use std::sync::Arc;

use citeline::agent::{AgentConfig, HandbookAgent};
use citeline::answer::CitationBounds;
use citeline::error::{AgentError, Result};
use citeline::llm::{CompletionResponse, LlmClient, MockLlmClient, Role, ToolCall};
use citeline::prompt::PromptRenderer;
use citeline::tools::{HANDBOOK_MISSING, ToolRegistry};
use tempfile::TempDir;

const HANDBOOK: &str = "# AI Implementation Handbook\n\n\
## 3.1 Algorithm Register\n\nHigh-impact algorithms must be published in the Algorithm Register.\n\n\
## 3.2 Registration details\n\nEach entry lists the purpose, the responsible organisation and a contact point.\n";

const CITED_ANSWER: &str = r#"{
    "answer": "Publish the system in the Algorithm Register with its purpose and a contact point.",
    "citations": [
        {"text": "High-impact algorithms must be published in the Algorithm Register.", "section": "3.1"},
        {"text": "Each entry lists the purpose, the responsible organisation and a contact point.", "section": "3.2"}
    ]
}"#;

fn handbook_dir() -> Result<TempDir> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("handbook.md"), HANDBOOK)?;
    Ok(dir)
}

fn agent(mock: Arc<MockLlmClient>, dir: &TempDir) -> Result<HandbookAgent<MockLlmClient>> {
    Ok(HandbookAgent::new(
        mock,
        ToolRegistry::standard(dir.path().join("handbook.md")),
        Arc::new(PromptRenderer::new()?),
    ))
}

fn handbook_call(id: &str) -> ToolCall {
    ToolCall::new(
        id,
        "search_handbook",
        r#"{"query": "requirements for registering an AI system"}"#,
    )
}

/// Integration test: capability question takes the direct branch
#[tokio::test]
async fn test_capability_question_has_no_citations() -> Result<()> {
    let dir = handbook_dir()?;
    let mock = Arc::new(MockLlmClient::new(vec![
        CompletionResponse::text("I can answer questions about AI policy."),
        CompletionResponse::text(r#"{"answer": "I answer questions about the AI handbook.", "citations": []}"#),
    ]));

    let answer = agent(mock.clone(), &dir)?.answer("What can you do?").await?;

    assert!(answer.citations.is_empty());
    assert_eq!(mock.request_count(), 2);
    assert!(mock.requests().iter().all(|r| r.messages.iter().all(|m| m.role != Role::Tool)));
    Ok(())
}

/// Integration test: handbook question runs the tool and returns 2-4 citations
#[tokio::test]
async fn test_registration_question_is_cited_from_handbook() -> Result<()> {
    let dir = handbook_dir()?;
    let mock = Arc::new(MockLlmClient::new(vec![
        CompletionResponse::tool_calls(vec![handbook_call("call_1")]),
        CompletionResponse::text(CITED_ANSWER),
    ]));

    let answer = agent(mock.clone(), &dir)?
        .answer("What are the requirements for registering an AI system in the Algorithm Register?")
        .await?;

    assert!((2..=4).contains(&answer.citations.len()));
    for citation in &answer.citations {
        assert!(!citation.text.trim().is_empty());
        assert!(!citation.section.trim().is_empty());
    }

    let requests = mock.requests();
    let final_request = &requests[1];
    assert_eq!(final_request.messages[0].role, Role::System);
    assert!(final_request.response_format.is_some());

    let tool_messages: Vec<_> = final_request.messages.iter().filter(|m| m.role == Role::Tool).collect();
    assert_eq!(tool_messages.len(), 1);
    assert_eq!(tool_messages[0].tool_call_id.as_deref(), Some("call_1"));
    assert_eq!(tool_messages[0].text(), HANDBOOK);
    Ok(())
}

/// Integration test: parallel tool calls each get exactly one result message
#[tokio::test]
async fn test_each_tool_call_gets_one_result() -> Result<()> {
    let dir = handbook_dir()?;
    let mock = Arc::new(MockLlmClient::new(vec![
        CompletionResponse::tool_calls(vec![handbook_call("call_a"), handbook_call("call_b")]),
        CompletionResponse::text(CITED_ANSWER),
    ]));

    agent(mock.clone(), &dir)?
        .answer("Do I need to perform an IAMA for a chatbot that answers citizen questions?")
        .await?;

    let requests = mock.requests();
    let ids: Vec<_> = requests[1]
        .messages
        .iter()
        .filter(|m| m.role == Role::Tool)
        .filter_map(|m| m.tool_call_id.as_deref())
        .collect();
    assert_eq!(ids, vec!["call_a", "call_b"]);
    Ok(())
}

/// Integration test: a missing handbook is reported to the model, not raised
#[tokio::test]
async fn test_missing_handbook_reaches_model() -> Result<()> {
    let dir = TempDir::new()?;
    let mock = Arc::new(MockLlmClient::new(vec![
        CompletionResponse::tool_calls(vec![handbook_call("call_1")]),
        CompletionResponse::text(
            r#"{"answer": "The handbook could not be loaded, so I cannot cite it.", "citations": []}"#,
        ),
    ]));

    let answer = agent(mock.clone(), &dir)?.answer("What does the handbook say?").await?;
    assert!(answer.citations.is_empty());

    let requests = mock.requests();
    let tool_message = requests[1]
        .messages
        .iter()
        .find(|m| m.role == Role::Tool)
        .map(|m| m.text().to_string());
    assert_eq!(tool_message.as_deref(), Some(HANDBOOK_MISSING));
    Ok(())
}

/// Integration test: unknown capability stops the loop after the first completion
#[tokio::test]
async fn test_unknown_tool_fails_closed() -> Result<()> {
    let dir = handbook_dir()?;
    let mock = Arc::new(MockLlmClient::new(vec![
        CompletionResponse::tool_calls(vec![ToolCall::new("call_1", "delete_everything", "{}")]),
        CompletionResponse::text(CITED_ANSWER),
    ]));

    let result = agent(mock.clone(), &dir)?.answer("Clean up").await;

    assert!(matches!(result, Err(AgentError::UnknownTool(name)) if name.contains("delete_everything")));
    assert_eq!(mock.request_count(), 1);
    assert_eq!(mock.remaining(), 1);
    Ok(())
}

/// Integration test: citation bounds come from configuration
#[tokio::test]
async fn test_configured_citation_bounds() -> Result<()> {
    let dir = handbook_dir()?;
    let mock = Arc::new(MockLlmClient::new(vec![
        CompletionResponse::tool_calls(vec![handbook_call("call_1")]),
        CompletionResponse::text(CITED_ANSWER),
    ]));

    let config = AgentConfig {
        citations: CitationBounds { min: 3, max: 5 },
        ..Default::default()
    };
    let agent = HandbookAgent::with_config(
        mock.clone(),
        ToolRegistry::standard(dir.path().join("handbook.md")),
        Arc::new(PromptRenderer::new()?),
        config,
    );

    let result = agent.answer("What are the registration requirements?").await;
    assert!(matches!(result, Err(AgentError::SchemaValidation(_))));

    let requests = mock.requests();
    assert!(requests[1].messages[0].text().contains("(3-5 maximum)"));
    Ok(())
}

/// Integration test: mock client is ready and named
#[test]
fn test_mock_llm_client_creation() {
    let mock = MockLlmClient::new(Vec::new());
    assert!(mock.is_ready());
    assert_eq!(mock.model(), "mock-model");
}
