//! Request and response types for model generation.

use crate::{Message, Output, ToolCall};
use serde::{Deserialize, Serialize};

/// Generic generation request (multimodal-safe).
///
/// # Examples
///
/// ```
/// use scenewright_core::{GenerateRequest, Message, Role};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::text(Role::User, "Hello!")])
///     .max_tokens(Some(100))
///     .temperature(Some(0.7))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages().len(), 1);
/// assert_eq!(*request.max_tokens(), Some(100));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Default,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into), default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    messages: Vec<Message>,
    /// Maximum number of tokens to generate
    max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 2.0)
    temperature: Option<f32>,
    /// Model identifier to use (driver default when absent)
    model: Option<String>,
    /// JSON schema the response text must conform to (JSON mode)
    response_schema: Option<serde_json::Value>,
}

impl GenerateRequest {
    /// Create a request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// Create a request from messages with every option left to the driver.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use scenewright_core::{GenerateResponse, Output};
///
/// let response = GenerateResponse {
///     outputs: vec![Output::Text("Here is a draft.".to_string())],
/// };
///
/// assert_eq!(response.text(), "Here is a draft.");
/// assert!(response.tool_calls().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated outputs from the model
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// All free-text outputs joined in order.
    pub fn text(&self) -> String {
        self.outputs
            .iter()
            .filter_map(|output| match output {
                Output::Text(text) => Some(text.as_str()),
                Output::ToolCalls(_) => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// All structured calls in the order the model sent them.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.outputs
            .iter()
            .filter_map(|output| match output {
                Output::ToolCalls(calls) => Some(calls.iter().cloned()),
                Output::Text(_) => None,
            })
            .flatten()
            .collect()
    }
}
