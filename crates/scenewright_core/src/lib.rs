//! Core data types for scenewright.
//!
//! This crate holds the script data model shared by every other crate: scenes,
//! the effects a conversational turn produces, the structured tool-call
//! requests the model sends, the chat message types exchanged with a model
//! driver, and the layered configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod anchor;
mod config;
mod effect;
mod input;
mod media;
mod message;
mod output;
mod request;
mod role;
mod scene;
mod script;
mod tool_request;

pub use anchor::{AnchorImage, AnchorImages, MAX_ANCHOR_IMAGES};
pub use config::{
    AssistantConfig, GeminiConfig, RetryConfig, ScenewrightConfig, ThumbnailConfig,
};
pub use effect::{Effect, ModelTier, TurnResult};
pub use input::Input;
pub use media::{MediaBlob, MediaSource};
pub use message::{Message, MessageBuilder, MessageBuilderError};
pub use output::{Output, ToolCall};
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateRequestBuilderError, GenerateResponse,
};
pub use role::Role;
pub use scene::{NumberingIssue, Scene, validate_numbering};
pub use script::{Script, apply_scene_effect};
pub use tool_request::{SceneDraft, SceneNarration, ToolCallRequest, ToolName};
