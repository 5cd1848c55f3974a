//! Trait definitions for scenewright.
//!
//! These traits are the seams between the orchestration engine and the
//! external services it talks to: the conversational model and the
//! thumbnail image generator.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{ScenewrightDriver, ThumbnailGenerator, ToolUse};
pub use types::ToolDefinition;
