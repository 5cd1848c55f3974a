//! Media types for multimodal content.

use serde::{Deserialize, Serialize};

/// Where media content is sourced from.
///
/// # Examples
///
/// ```
/// use scenewright_core::MediaSource;
///
/// let url = MediaSource::Url("https://example.com/image.png".to_string());
/// let binary = MediaSource::Binary(vec![0x89, 0x50, 0x4E, 0x47]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaSource {
    /// URL to fetch the content from
    Url(String),
    /// Base64-encoded content
    Base64(String),
    /// Raw binary data
    Binary(Vec<u8>),
}

/// An opaque binary artifact (generated image, narration audio, thumbnail).
///
/// The engine never inspects these bytes; it only carries them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaBlob {
    /// MIME type, e.g. "image/png"
    pub mime: String,
    /// Raw bytes
    pub data: Vec<u8>,
}

impl MediaBlob {
    /// Wrap raw bytes with their MIME type.
    pub fn new(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }
}
