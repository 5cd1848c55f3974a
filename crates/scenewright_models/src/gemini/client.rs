//! Gemini `generateContent` client.

use super::GeminiResult;
use super::conversion::{from_gemini_response, to_gemini_request};
use super::dto::GenerateContentResponse;
use super::transport::{Transport, api_key_from_env};
use async_trait::async_trait;
use scenewright_core::{GeminiConfig, GenerateRequest, GenerateResponse};
use scenewright_error::ScenewrightResult;
use scenewright_interface::{ScenewrightDriver, ToolDefinition, ToolUse};
use tracing::{debug, instrument};

/// Client for Google's Gemini text models.
///
/// Requests use the configured chat model unless the request names one.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    transport: Transport,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, config: GeminiConfig) -> ScenewrightResult<Self> {
        let transport = Transport::new(api_key, config.base_url().clone(), config.retry().clone())?;
        Ok(Self { transport, config })
    }

    /// Create a client reading the key from `GEMINI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the key is missing.
    pub fn from_env(config: GeminiConfig) -> ScenewrightResult<Self> {
        Self::new(api_key_from_env()?, config)
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    async fn call(
        &self,
        req: &GenerateRequest,
        tools: &[ToolDefinition],
    ) -> GeminiResult<GenerateResponse> {
        let model = req
            .model()
            .clone()
            .unwrap_or_else(|| self.config.chat_model().clone());
        let body = to_gemini_request(req, tools, &self.config)?;
        let url = self.transport.model_url(&model, "generateContent");

        debug!(
            model = %model,
            contents = body.contents.len(),
            tools = tools.len(),
            "Calling Gemini generateContent"
        );

        let response: GenerateContentResponse = self.transport.post_json(&url, &body).await?;
        from_gemini_response(response)
    }
}

#[async_trait]
impl ScenewrightDriver for GeminiClient {
    #[instrument(
        name = "gemini_generate",
        skip(self, req),
        fields(messages = req.messages().len(), model = %self.config.chat_model())
    )]
    async fn generate(&self, req: &GenerateRequest) -> ScenewrightResult<GenerateResponse> {
        Ok(self.call(req, &[]).await?)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        self.config.chat_model()
    }
}

#[async_trait]
impl ToolUse for GeminiClient {
    #[instrument(
        name = "gemini_generate_with_tools",
        skip(self, req, tools),
        fields(messages = req.messages().len(), tools = tools.len())
    )]
    async fn generate_with_tools(
        &self,
        req: &GenerateRequest,
        tools: &[ToolDefinition],
    ) -> ScenewrightResult<GenerateResponse> {
        Ok(self.call(req, tools).await?)
    }
}
