//! Error types for the scenewright workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! The variants line up with how far a failure is allowed to travel:
//!
//! - [`ConfigError`] is fatal to a session.
//! - [`ProtocolError`] and [`DownstreamError`] are contained to a single effect.
//! - [`SessionError`] and [`GeminiError`] abort the turn that raised them.
//! - [`StorageError`] is raised by hosts reading and writing local files.
//!
//! # Examples
//!
//! ```
//! use scenewright_error::{ConfigError, ScenewrightResult};
//!
//! fn load_key() -> ScenewrightResult<String> {
//!     Err(ConfigError::new("GEMINI_API_KEY is not set"))?
//! }
//!
//! assert!(load_key().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod downstream;
mod error;
mod gemini;
mod json;
mod protocol;
mod session;
mod storage;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use downstream::DownstreamError;
pub use error::{ScenewrightError, ScenewrightErrorKind, ScenewrightResult};
pub use gemini::{GeminiError, GeminiErrorKind, RetryableError};
pub use json::JsonError;
pub use protocol::{ProtocolError, ProtocolErrorKind};
pub use session::{SessionError, SessionErrorKind};
pub use storage::{StorageError, StorageErrorKind};
