//! Errors from reading or writing script JSON.

/// A script file or payload that is not valid script JSON.
///
/// Raised when a saved script fails to parse or serialize. Malformed JSON
/// coming back from the model is a [`ProtocolError`](crate::ProtocolError)
/// instead, because it only costs the one effect.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// What serde_json reported, usually prefixed with the file path
    pub message: String,
    /// Line where the error was raised
    pub line: u32,
    /// Source file where the error was raised
    pub file: &'static str,
}

impl JsonError {
    /// Record a JSON failure at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use scenewright_error::JsonError;
    ///
    /// let err = JsonError::new("video.json: expected `,` or `]` at line 4 column 3");
    /// assert!(err.message.starts_with("video.json"));
    /// assert!(err.to_string().starts_with("JSON Error: video.json"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
