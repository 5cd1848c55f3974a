//! Imagen thumbnail generation.

use super::dto::{PredictInstance, PredictParameters, PredictRequest, PredictResponse};
use super::transport::{Transport, api_key_from_env};
use async_trait::async_trait;
use base64::{Engine, prelude::BASE64_STANDARD};
use scenewright_core::{GeminiConfig, MediaBlob, ModelTier, ThumbnailConfig};
use scenewright_error::{GeminiError, GeminiErrorKind, ScenewrightResult};
use scenewright_interface::ThumbnailGenerator;
use tracing::{info, instrument};

/// Client for Google's Imagen `predict` endpoint.
#[derive(Debug, Clone)]
pub struct ImagenClient {
    transport: Transport,
    config: ThumbnailConfig,
}

impl ImagenClient {
    /// Create a client sharing the Gemini endpoint and retry settings.
    pub fn new(
        api_key: impl Into<String>,
        gemini: &GeminiConfig,
        config: ThumbnailConfig,
    ) -> ScenewrightResult<Self> {
        let transport = Transport::new(api_key, gemini.base_url().clone(), gemini.retry().clone())?;
        Ok(Self { transport, config })
    }

    /// Create a client reading the key from `GEMINI_API_KEY`.
    pub fn from_env(gemini: &GeminiConfig, config: ThumbnailConfig) -> ScenewrightResult<Self> {
        Self::new(api_key_from_env()?, gemini, config)
    }
}

#[async_trait]
impl ThumbnailGenerator for ImagenClient {
    #[instrument(name = "imagen_generate", skip(self, prompt), fields(tier = %tier, prompt_len = prompt.len()))]
    async fn generate_thumbnail(
        &self,
        prompt: &str,
        tier: ModelTier,
    ) -> ScenewrightResult<MediaBlob> {
        let model = self.config.model_for(tier);
        let url = self.transport.model_url(model, "predict");
        let body = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt.to_string(),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: self.config.aspect_ratio().clone(),
            },
        };

        let response: PredictResponse = self.transport.post_json(&url, &body).await?;

        let (encoded, mime) = response
            .predictions
            .into_iter()
            .find_map(|p| p.bytes_base64_encoded.map(|bytes| (bytes, p.mime_type)))
            .ok_or_else(|| GeminiError::new(GeminiErrorKind::NoImage(model.to_string())))?;

        let data = BASE64_STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| GeminiError::new(GeminiErrorKind::Base64Decode(e.to_string())))?;
        let mime = mime.unwrap_or_else(|| "image/png".to_string());

        info!(model, bytes = data.len(), mime = %mime, "Thumbnail generated");
        Ok(MediaBlob::new(mime, data))
    }
}
