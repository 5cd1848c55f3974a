//! Model backends for scenewright.
//!
//! - [`GeminiClient`] talks to the Gemini `generateContent` REST endpoint and
//!   implements [`ScenewrightDriver`](scenewright_interface::ScenewrightDriver)
//!   and [`ToolUse`](scenewright_interface::ToolUse).
//! - [`ImagenClient`] talks to the Imagen `predict` endpoint and implements
//!   [`ThumbnailGenerator`](scenewright_interface::ThumbnailGenerator).
//!
//! Both share one HTTP transport that retries transient failures with
//! exponential backoff.
//!
//! ```no_run
//! use scenewright_core::{GenerateRequest, Message, Role, ScenewrightConfig};
//! use scenewright_interface::ScenewrightDriver;
//! use scenewright_models::GeminiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScenewrightConfig::load()?;
//! let client = GeminiClient::from_env(config.gemini().clone())?;
//! let request = GenerateRequest::new(vec![Message::text(Role::User, "Hello")]);
//! let response = client.generate(&request).await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;

pub use gemini::{API_KEY_ENV, GeminiClient, GeminiResult, ImagenClient, api_key_from_env};
