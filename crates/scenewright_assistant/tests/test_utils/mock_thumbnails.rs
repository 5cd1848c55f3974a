//! Mock thumbnail generator for testing.

use async_trait::async_trait;
use scenewright_core::{MediaBlob, ModelTier};
use scenewright_error::{GeminiError, GeminiErrorKind, ScenewrightResult};
use scenewright_interface::ThumbnailGenerator;
use std::sync::{Arc, Mutex};

/// Returns a fixed image, or always fails.
#[derive(Clone)]
pub struct MockThumbnails {
    fail: Option<GeminiErrorKind>,
    calls: Arc<Mutex<Vec<(String, ModelTier)>>>,
}

impl MockThumbnails {
    pub fn new_success() -> Self {
        Self {
            fail: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn new_error(kind: GeminiErrorKind) -> Self {
        Self {
            fail: Some(kind),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every (prompt, tier) requested, in order.
    pub fn calls(&self) -> Vec<(String, ModelTier)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn image() -> MediaBlob {
        MediaBlob::new("image/png", vec![0x89, 0x50, 0x4E, 0x47])
    }
}

#[async_trait]
impl ThumbnailGenerator for MockThumbnails {
    async fn generate_thumbnail(
        &self,
        prompt: &str,
        tier: ModelTier,
    ) -> ScenewrightResult<MediaBlob> {
        self.calls.lock().unwrap().push((prompt.to_string(), tier));
        match &self.fail {
            Some(kind) => Err(GeminiError::new(kind.clone()).into()),
            None => Ok(Self::image()),
        }
    }
}
