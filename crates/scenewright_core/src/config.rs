//! Layered configuration.
//!
//! Sources, later overriding earlier:
//! - Bundled defaults (`scenewright.toml` at the workspace root, `include_str!`)
//! - `~/.config/scenewright/scenewright.toml`
//! - `./scenewright.toml`
//!
//! The API key is not part of the configuration; hosts read `GEMINI_API_KEY`.

use crate::ModelTier;
use config::{Config, File, FileFormat};
use scenewright_error::{ConfigError, ScenewrightError, ScenewrightResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../scenewright.toml");

/// Retry overrides for transient Gemini failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct RetryConfig {
    /// Retry at all
    #[serde(default = "default_true")]
    enabled: bool,
    /// Override the per-status retry count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_retries: Option<usize>,
    /// Override the per-status initial backoff
    #[serde(default, skip_serializing_if = "Option::is_none")]
    initial_backoff_ms: Option<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: None,
            initial_backoff_ms: None,
        }
    }
}

impl RetryConfig {
    /// A configuration that never retries.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// Gemini text model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GeminiConfig {
    /// Model used for conversational turns
    chat_model: String,
    /// Model used for batch translation
    translation_model: String,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Output token cap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    /// REST endpoint root
    base_url: String,
    /// Retry behaviour
    #[serde(default)]
    retry: RetryConfig,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            chat_model: "gemini-2.5-flash".to_string(),
            translation_model: "gemini-2.5-flash".to_string(),
            temperature: None,
            max_output_tokens: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            retry: RetryConfig::default(),
        }
    }
}

impl GeminiConfig {
    /// Replace the retry settings.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Point the client at another endpoint (used by tests and proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Thumbnail image model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ThumbnailConfig {
    /// Tier used when the model does not pick one
    #[serde(default)]
    default_tier: ModelTier,
    /// Image model for [`ModelTier::Cheap`]
    cheap_model: String,
    /// Image model for [`ModelTier::Expensive`]
    expensive_model: String,
    /// Requested aspect ratio
    aspect_ratio: String,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            default_tier: ModelTier::Cheap,
            cheap_model: "imagen-4.0-fast-generate-001".to_string(),
            expensive_model: "imagen-4.0-ultra-generate-001".to_string(),
            aspect_ratio: "16:9".to_string(),
        }
    }
}

impl ThumbnailConfig {
    /// Image model for a tier.
    pub fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Cheap => &self.cheap_model,
            ModelTier::Expensive => &self.expensive_model,
        }
    }
}

/// Conversation behaviour settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct AssistantConfig {
    /// Replaces the built-in system instruction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    system_instruction: Option<String>,
    /// How many scene descriptions feed a derived thumbnail prompt
    #[serde(default = "default_fallback_thumbnail_scenes")]
    fallback_thumbnail_scenes: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            system_instruction: None,
            fallback_thumbnail_scenes: default_fallback_thumbnail_scenes(),
        }
    }
}

/// Complete scenewright configuration.
///
/// # Examples
///
/// ```no_run
/// use scenewright_core::ScenewrightConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ScenewrightConfig::load()?;
/// println!("chatting with {}", config.gemini().chat_model());
/// # Ok(())
/// # }
/// ```
#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct ScenewrightConfig {
    /// Text model settings
    #[serde(default)]
    gemini: GeminiConfig,
    /// Image model settings
    #[serde(default)]
    thumbnail: ThumbnailConfig,
    /// Conversation settings
    #[serde(default)]
    assistant: AssistantConfig,
}

impl ScenewrightConfig {
    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and skipped when absent.
    #[instrument]
    pub fn load() -> ScenewrightResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/scenewright/scenewright.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("scenewright").required(false));

        Self::finish(builder)
    }

    /// Load bundled defaults overridden by one specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ScenewrightResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));

        Self::finish(builder)
    }

    /// Parse configuration from a TOML string layered over bundled defaults.
    pub fn from_toml_str(toml: &str) -> ScenewrightResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(toml, FileFormat::Toml));

        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> ScenewrightResult<Self> {
        builder
            .build()
            .map_err(|e| {
                ScenewrightError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ScenewrightError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}

fn default_true() -> bool {
    true
}

fn default_fallback_thumbnail_scenes() -> usize {
    3
}
