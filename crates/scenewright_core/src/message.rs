//! Message types for conversation history.

use crate::{Input, Role};
use serde::{Deserialize, Serialize};

/// A multimodal message in a conversation.
///
/// # Examples
///
/// ```
/// use scenewright_core::{Message, Role, Input};
///
/// let message = Message::new(Role::User, vec![Input::Text("Hello!".to_string())]);
///
/// assert_eq!(*message.role(), Role::User);
/// assert_eq!(message.content().len(), 1);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct Message {
    /// The role of the message sender
    role: Role,
    /// The content of the message (can be multimodal)
    content: Vec<Input>,
}

impl Message {
    /// Create a message from a role and its content parts.
    pub fn new(role: Role, content: Vec<Input>) -> Self {
        Self { role, content }
    }

    /// Create a single-part text message.
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self::new(role, vec![Input::Text(text.into())])
    }

    /// Create a message builder.
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    /// Concatenated text parts of this message.
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .filter_map(|input| match input {
                Input::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
