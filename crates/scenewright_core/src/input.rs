//! Input types carried inside chat messages.

use crate::{MediaSource, ToolCall};
use serde::{Deserialize, Serialize};

/// One content part of a chat message.
///
/// # Examples
///
/// ```
/// use scenewright_core::{Input, MediaSource};
///
/// let text = Input::Text("Make scene 2 darker".to_string());
/// let image = Input::Image {
///     mime: Some("image/png".to_string()),
///     source: MediaSource::Binary(vec![0x89, 0x50]),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Input {
    /// Plain text.
    Text(String),

    /// Image part (anchor images attached by the user).
    Image {
        /// MIME type, e.g., "image/png" or "image/jpeg"
        mime: Option<String>,
        /// Media source
        source: MediaSource,
    },

    /// A function call previously emitted by the model, replayed in history.
    FunctionCall(ToolCall),

    /// The acknowledgement sent back for a function call.
    FunctionResponse {
        /// Name of the function being answered
        name: String,
        /// Result payload
        response: serde_json::Value,
    },
}
