//! Output types from model responses.

use serde::{Deserialize, Serialize};

/// One piece of a model response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Free text.
    Text(String),

    /// Tool/function calls requested by the model, in the order sent.
    ToolCalls(Vec<ToolCall>),
}

/// A tool/function call made by the model.
///
/// Arguments are kept as raw JSON; they are validated against the tool's
/// schema only when dispatched.
///
/// # Examples
///
/// ```
/// use scenewright_core::ToolCall;
/// use serde_json::json;
///
/// let call = ToolCall {
///     id: "call_0".to_string(),
///     name: "generateYouTubeTitle".to_string(),
///     arguments: json!({"title": "The Last Lighthouse"}),
/// };
///
/// assert_eq!(call.name, "generateYouTubeTitle");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolCall {
    /// Identifier for this call within its response
    pub id: String,
    /// Name of the tool/function to call
    pub name: String,
    /// Arguments to pass to the tool (as JSON)
    pub arguments: serde_json::Value,
}
