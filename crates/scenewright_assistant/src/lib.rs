//! Tool-calling orchestration for scenewright.
//!
//! One conversational turn flows through this crate as:
//!
//! 1. [`ContextBuilder`] renders the current scenes into a `CURRENT SCRIPT:` block.
//! 2. [`ConversationSession`] prepends it to the user's message, attaches any
//!    anchor images and makes the model round trip with the
//!    [`tool_definitions`] on offer.
//! 3. Structured calls go to [`ToolCallDispatcher`], which validates them,
//!    runs their handlers in order and contains per-call failures.
//! 4. With no structured calls, [`FallbackExtractor`] looks for a scene array
//!    embedded in the free text.
//!
//! The result is a [`TurnResult`](scenewright_core::TurnResult) the host
//! applies to its own script. [`TranslationContract`] is the standalone
//! batch-translation call with its strict length rule.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod dispatcher;
mod extraction;
mod prompts;
mod session;
mod tools;
mod translation;

pub use context::{CONTEXT_DELIMITER, ContextBuilder};
pub use dispatcher::{CallStatus, DispatchOutcome, ToolCallDispatcher};
pub use extraction::FallbackExtractor;
pub use prompts::{DEFAULT_SYSTEM_INSTRUCTION, anchor_preface};
pub use session::{ConversationSession, SessionState};
pub use tools::{parse_tool_call, tool_definitions};
pub use translation::TranslationContract;
