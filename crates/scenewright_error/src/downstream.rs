//! Errors raised by the side-effecting handlers behind a tool call.

/// A tool handler's own network call failed.
///
/// The dispatcher catches this and turns it into a failure sentence for the
/// one effect that raised it.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Downstream Error ({}): {} at line {} in {}", service, message, line, file)]
pub struct DownstreamError {
    /// Which collaborator failed (e.g. "thumbnail")
    pub service: String,
    /// Human readable failure description
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl DownstreamError {
    /// Create a new DownstreamError at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use scenewright_error::DownstreamError;
    ///
    /// let err = DownstreamError::new("thumbnail", "quota exceeded");
    /// assert_eq!(err.service, "thumbnail");
    /// ```
    #[track_caller]
    pub fn new(service: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            service: service.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
