//! Google Gemini and Imagen REST clients.

mod client;
mod conversion;
mod dto;
mod imagen;
mod transport;

pub use client::GeminiClient;
pub use imagen::ImagenClient;
pub use transport::{API_KEY_ENV, api_key_from_env};

/// Result type for Gemini operations.
pub type GeminiResult<T> = Result<T, scenewright_error::GeminiError>;
