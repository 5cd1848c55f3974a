//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the scenewright binary.

mod chat;
mod commands;
mod context;
mod translate;

pub use chat::run_chat;
pub use commands::{Cli, Commands};
pub use context::show_context;
pub use translate::run_translate;
