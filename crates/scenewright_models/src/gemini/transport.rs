//! Shared HTTP transport with retry for Google generative endpoints.

use super::GeminiResult;
use scenewright_core::RetryConfig;
use scenewright_error::{ConfigError, GeminiError, GeminiErrorKind, ScenewrightResult};
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};
use tracing::{debug, error, info, warn};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Read the API key from the environment.
///
/// # Errors
///
/// Returns a [`ConfigError`] when the variable is unset or empty.
pub fn api_key_from_env() -> ScenewrightResult<String> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(ConfigError::new(format!("{} environment variable not set", API_KEY_ENV)).into()),
    }
}

#[derive(Clone)]
pub(crate) struct Transport {
    client: Client,
    api_key: String,
    base_url: String,
    retry: RetryConfig,
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl Transport {
    pub(crate) fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        retry: RetryConfig,
    ) -> GeminiResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry,
        })
    }

    /// URL of a model method, e.g. `models/gemini-2.5-flash:generateContent`.
    pub(crate) fn model_url(&self, model: &str, method: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    /// POST a JSON body, retrying transient failures.
    pub(crate) async fn post_json<B, R>(&self, url: &str, body: &B) -> GeminiResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let first = self.post_once(url, body).await;
        let err = match first {
            Ok(response) => return Ok(response),
            Err(e) => e,
        };

        if !*self.retry.enabled() || !err.kind.is_retryable() {
            warn!(error = %err, "Permanent Gemini error, failing immediately");
            return Err(err);
        }

        let (mut initial_ms, mut max_retries, max_delay_secs) = err.kind.retry_strategy_params();
        if let Some(override_backoff) = self.retry.initial_backoff_ms() {
            initial_ms = *override_backoff;
        }
        if let Some(override_retries) = self.retry.max_retries() {
            max_retries = *override_retries;
        }

        info!(
            error = %err,
            initial_backoff_ms = initial_ms,
            max_retries,
            max_delay_secs,
            "Gemini request failed, will retry with configured strategy"
        );

        let retry_strategy = ExponentialBackoff::from_millis(initial_ms)
            .factor(2)
            .max_delay(Duration::from_secs(max_delay_secs))
            .map(jitter)
            .take(max_retries);

        Retry::spawn(retry_strategy, || async {
            match self.post_once(url, body).await {
                Ok(response) => Ok(response),
                Err(e) if e.kind.is_retryable() => {
                    warn!(error = %e, "Gemini request failed, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(error = %e, "Permanent Gemini error, failing immediately");
                    Err(RetryError::Permanent(e))
                }
            }
        })
        .await
    }

    async fn post_once<B, R>(&self, url: &str, body: &B) -> GeminiResult<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        debug!(url, "Sending request to Gemini API");

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Gemini API");
                GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Gemini API returned error");
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message: body,
            }));
        }

        response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Gemini response");
            GeminiError::new(GeminiErrorKind::ResponseParse(e.to_string()))
        })
    }
}
