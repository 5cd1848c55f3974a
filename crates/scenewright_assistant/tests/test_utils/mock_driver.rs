//! Scripted model driver for testing.

use async_trait::async_trait;
use scenewright_core::{GenerateRequest, GenerateResponse, Output, ToolCall};
use scenewright_error::{GeminiError, GeminiErrorKind, ScenewrightError, ScenewrightResult};
use scenewright_interface::{ScenewrightDriver, ToolDefinition, ToolUse};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A single scripted reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Plain text
    Text(String),
    /// Optional text plus structured calls, given as (name, arguments)
    Calls {
        text: Option<String>,
        calls: Vec<(String, Value)>,
    },
    /// A failed round trip
    Error(GeminiErrorKind),
}

impl MockResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn call(name: &str, arguments: Value) -> Self {
        Self::Calls {
            text: None,
            calls: vec![(name.to_string(), arguments)],
        }
    }

    pub fn calls(calls: Vec<(&str, Value)>) -> Self {
        Self::Calls {
            text: None,
            calls: calls
                .into_iter()
                .map(|(name, args)| (name.to_string(), args))
                .collect(),
        }
    }
}

/// Mock driver replaying a sequence of responses.
///
/// Clones share the same sequence, call count and request log.
#[derive(Clone)]
pub struct MockDriver {
    responses: Arc<Vec<MockResponse>>,
    call_count: Arc<Mutex<usize>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
    tools_seen: Arc<Mutex<Vec<Vec<ToolDefinition>>>>,
    delay: Duration,
}

impl MockDriver {
    /// Create a mock that replies with each response in turn.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Arc::new(responses),
            call_count: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
            tools_seen: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::from_millis(1),
        }
    }

    /// Create a mock with a single reply.
    pub fn new_single(response: MockResponse) -> Self {
        Self::new_sequence(vec![response])
    }

    /// Simulate a slow network.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of round trips made.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The tool list offered with each request.
    pub fn tools_seen(&self) -> Vec<Vec<ToolDefinition>> {
        self.tools_seen.lock().unwrap().clone()
    }

    fn next_response(&self) -> ScenewrightResult<GenerateResponse> {
        let mut count = self.call_count.lock().unwrap();
        let current_count = *count;
        *count += 1;

        let Some(response) = self.responses.get(current_count) else {
            return Err(ScenewrightError::from(GeminiError::new(
                GeminiErrorKind::ApiRequest(format!(
                    "Mock sequence exhausted (call {} beyond {} responses)",
                    current_count + 1,
                    self.responses.len()
                )),
            )));
        };

        match response {
            MockResponse::Text(text) => Ok(GenerateResponse {
                outputs: vec![Output::Text(text.clone())],
            }),
            MockResponse::Calls { text, calls } => {
                let mut outputs = Vec::new();
                if let Some(text) = text {
                    outputs.push(Output::Text(text.clone()));
                }
                outputs.push(Output::ToolCalls(
                    calls
                        .iter()
                        .enumerate()
                        .map(|(i, (name, arguments))| ToolCall {
                            id: format!("call_{}", i),
                            name: name.clone(),
                            arguments: arguments.clone(),
                        })
                        .collect(),
                ));
                Ok(GenerateResponse { outputs })
            }
            MockResponse::Error(kind) => Err(ScenewrightError::from(GeminiError::new(kind.clone()))),
        }
    }
}

#[async_trait]
impl ScenewrightDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> ScenewrightResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        // Consume the response up front so a cancelled call still uses it up.
        let response = self.next_response();
        tokio::time::sleep(self.delay).await;
        response
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

#[async_trait]
impl ToolUse for MockDriver {
    async fn generate_with_tools(
        &self,
        req: &GenerateRequest,
        tools: &[ToolDefinition],
    ) -> ScenewrightResult<GenerateResponse> {
        self.tools_seen.lock().unwrap().push(tools.to_vec());
        self.generate(req).await
    }
}
