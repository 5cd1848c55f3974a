//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, DownstreamError, GeminiError, JsonError, ProtocolError,
    SessionError, StorageError,
};

/// Every error condition a scenewright crate can report.
///
/// # Examples
///
/// ```
/// use scenewright_error::{ScenewrightError, JsonError};
///
/// let json_err = JsonError::new("expected value at line 1 column 1");
/// let err: ScenewrightError = json_err.into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ScenewrightErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration or credential error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Gemini API error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Malformed tool call or translation response
    #[from(ProtocolError)]
    Protocol(ProtocolError),
    /// A tool handler's own network call failed
    #[from(DownstreamError)]
    Downstream(DownstreamError),
    /// Conversation session misuse
    #[from(SessionError)]
    Session(SessionError),
    /// Local file error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Scenewright error with kind discrimination.
///
/// # Examples
///
/// ```
/// use scenewright_error::{ScenewrightErrorKind, ScenewrightResult, ConfigError};
///
/// fn might_fail() -> ScenewrightResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), ScenewrightErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Scenewright Error: {}", _0)]
pub struct ScenewrightError(Box<ScenewrightErrorKind>);

impl ScenewrightError {
    /// Create a new error from a kind.
    pub fn new(kind: ScenewrightErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ScenewrightErrorKind {
        &self.0
    }

    /// Whether this error should end the whole session rather than one turn.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind(), ScenewrightErrorKind::Config(_))
    }
}

// Generic From implementation for any type that converts to ScenewrightErrorKind
impl<T> From<T> for ScenewrightError
where
    T: Into<ScenewrightErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for scenewright operations.
pub type ScenewrightResult<T> = std::result::Result<T, ScenewrightError>;
