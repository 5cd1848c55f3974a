//! Conversation session errors.

/// Specific error conditions for a conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SessionErrorKind {
    /// `send_turn` was called while another turn was awaiting the model
    #[display("A turn is already awaiting the model")]
    TurnInFlight,
    /// The model answered with neither text nor tool calls
    #[display("The model returned an empty response")]
    EmptyResponse,
}

/// Session error with source location tracking.
///
/// # Examples
///
/// ```
/// use scenewright_error::{SessionError, SessionErrorKind};
///
/// let err = SessionError::new(SessionErrorKind::TurnInFlight);
/// assert!(format!("{}", err).contains("already awaiting"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Session Error: {} at line {} in {}", kind, line, file)]
pub struct SessionError {
    /// The specific error condition
    pub kind: SessionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SessionError {
    /// Create a new SessionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SessionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
