//! Batch narration translation with a strict length contract.

use crate::prompts::translation_prompt;
use scenewright_core::{GenerateRequest, Message, Role};
use scenewright_error::{BuilderError, ProtocolError, ProtocolErrorKind, ScenewrightResult};
use scenewright_interface::ScenewrightDriver;
use serde_json::json;
use tracing::{debug, instrument, warn};

/// Translates a batch of narrations in one model call.
///
/// The result always has exactly as many entries as the input, in the same
/// order, or the call fails. Bracketed tags are preserved by instruction only;
/// nothing here inspects or repairs them.
#[derive(Debug, Clone)]
pub struct TranslationContract<D: ScenewrightDriver> {
    driver: D,
    model: Option<String>,
}

impl<D: ScenewrightDriver> TranslationContract<D> {
    /// Translate with the driver's default model.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            model: None,
        }
    }

    /// Translate with a specific model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Translate `narrations` into `target_language`.
    ///
    /// An empty batch returns immediately without calling the model.
    ///
    /// # Errors
    ///
    /// - [`ProtocolErrorKind::MalformedResponse`] when the reply is not a JSON
    ///   array of strings.
    /// - [`ProtocolErrorKind::LengthMismatch`] when it has the wrong length.
    /// - Any driver error from the round trip itself.
    #[instrument(
        name = "translate_batch",
        skip(self, narrations),
        fields(count = narrations.len(), target_language)
    )]
    pub async fn translate_batch(
        &self,
        narrations: &[String],
        target_language: &str,
    ) -> ScenewrightResult<Vec<String>> {
        if narrations.is_empty() {
            debug!("Empty batch, skipping translation call");
            return Ok(Vec::new());
        }

        let request = GenerateRequest::builder()
            .messages(vec![Message::text(
                Role::User,
                translation_prompt(narrations, target_language),
            )])
            .model(self.model.clone())
            .response_schema(Some(json!({
                "type": "ARRAY",
                "items": {"type": "STRING"}
            })))
            .build()
            .map_err(|e| BuilderError::from(e.to_string()))?;

        let response = self.driver.generate(&request).await?;
        let text = response.text();

        let translated: Vec<String> = serde_json::from_str(text.trim()).map_err(|e| {
            warn!(error = %e, response_length = text.len(), "Translation reply is not a JSON string array");
            ProtocolError::new(ProtocolErrorKind::MalformedResponse(e.to_string()))
        })?;

        if translated.len() != narrations.len() {
            warn!(
                expected = narrations.len(),
                actual = translated.len(),
                "Translation reply has the wrong length"
            );
            return Err(ProtocolError::new(ProtocolErrorKind::LengthMismatch {
                expected: narrations.len(),
                actual: translated.len(),
            })
            .into());
        }

        debug!("Translation batch complete");
        Ok(translated)
    }
}
