//! Scenewright: co-author narrated video scripts with a Gemini assistant.
//!
//! A script is an ordered list of scenes, each with a visual description and
//! spoken narration. The assistant either talks with the user or calls one of
//! five tools (generate the script, translate narration, write the YouTube
//! title, description or thumbnail). Every tool call is validated and turned
//! into an [`Effect`] that the host applies to its own [`Script`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use scenewright::{
//!     AnchorImages, ConversationSession, GeminiClient, Script, ScenewrightConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ScenewrightConfig::load()?;
//!     let client = GeminiClient::from_env(config.gemini().clone())?;
//!     let session = ConversationSession::from_config(client, None, &config);
//!
//!     let mut script = Script::default();
//!     let turn = session
//!         .send_turn("A three-scene video about lighthouses", &script.scenes, &AnchorImages::default())
//!         .await?;
//!     script.apply_all(&turn);
//!     println!("{}", turn.display_text());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `scenewright_error` - Error types
//! - `scenewright_core` - Scenes, effects, chat messages, configuration
//! - `scenewright_interface` - Driver and thumbnail generator traits
//! - `scenewright_models` - Gemini and Imagen clients
//! - `scenewright_assistant` - Context, dispatch, extraction, translation, sessions
//!
//! This crate re-exports everything for convenience and ships the
//! `scenewright` command-line host.
//!
//! # Cargo Features
//!
//! - `observability` - OpenTelemetry span export to stdout
//! - `api` - Run tests that call the real Gemini API

pub use scenewright_assistant::*;
pub use scenewright_core::*;
pub use scenewright_error::*;
pub use scenewright_interface::*;
pub use scenewright_models::*;

pub mod files;

#[cfg(feature = "observability")]
pub mod observability;
