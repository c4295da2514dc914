//! Mock LLM client for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::recommend::{CompletionRequest, CompletionResponse, LlmClient, LlmError, LlmUsage};

/// Mock implementation of the LlmClient trait.
///
/// Replies with a scripted text (an empty JSON array until one is set) and
/// records every request it receives.
#[derive(Debug)]
pub struct MockLlmClient {
    response: Arc<RwLock<String>>,
    requests: Arc<RwLock<Vec<CompletionRequest>>>,
    /// If set, the next completion will fail with this error.
    next_error: Arc<RwLock<Option<LlmError>>>,
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            response: Arc::new(RwLock::new("[]".to_string())),
            requests: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the text returned by every subsequent completion.
    pub async fn set_response(&self, text: impl Into<String>) {
        *self.response.write().await = text.into();
    }

    /// Set an error to be returned on the next completion.
    pub async fn set_next_error(&self, error: LlmError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get all recorded requests.
    pub async fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests.read().await.clone()
    }

    /// Prompts of all recorded requests.
    pub async fn recorded_prompts(&self) -> Vec<String> {
        self.requests
            .read()
            .await
            .iter()
            .map(|r| r.prompt.clone())
            .collect()
    }

    /// Number of completions requested so far.
    pub async fn call_count(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.requests.write().await.push(request);

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        Ok(CompletionResponse {
            text: self.response.read().await.clone(),
            usage: LlmUsage {
                input_tokens: 100,
                output_tokens: 50,
            },
        })
    }
}
