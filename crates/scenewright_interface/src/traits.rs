//! Trait definitions for model and media backends.

use crate::ToolDefinition;
use async_trait::async_trait;
use scenewright_core::{GenerateRequest, GenerateResponse, MediaBlob, ModelTier};
use scenewright_error::ScenewrightResult;

/// Core trait that all model backends implement.
#[async_trait]
pub trait ScenewrightDriver: Send + Sync {
    /// Generate model output given a multimodal request.
    async fn generate(&self, req: &GenerateRequest) -> ScenewrightResult<GenerateResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier.
    fn model_name(&self) -> &str;
}

/// Trait for models that support function/tool calling.
#[async_trait]
pub trait ToolUse: ScenewrightDriver {
    /// Generate with available tools/functions.
    ///
    /// The response may contain tool calls (in `Output::ToolCalls`) instead of
    /// or in addition to text output.
    async fn generate_with_tools(
        &self,
        req: &GenerateRequest,
        tools: &[ToolDefinition],
    ) -> ScenewrightResult<GenerateResponse>;

    /// Whether the model may return several tool calls in one turn.
    fn supports_parallel_tool_calls(&self) -> bool {
        true
    }
}

/// Produces thumbnail pixels from a prompt.
///
/// Implementations are opaque to the engine: they either return an image or fail.
#[async_trait]
pub trait ThumbnailGenerator: Send + Sync {
    /// Generate one image for the prompt at the given quality tier.
    async fn generate_thumbnail(&self, prompt: &str, tier: ModelTier)
    -> ScenewrightResult<MediaBlob>;
}
