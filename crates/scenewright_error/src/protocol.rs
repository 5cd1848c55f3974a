//! Errors for model output that does not honour the tool or translation contract.

/// Ways a model response can break the structured-call protocol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ProtocolErrorKind {
    /// A tool call's arguments did not match its schema
    #[display("Malformed arguments for '{}': {}", tool, reason)]
    MalformedArguments {
        /// Tool name as sent by the model
        tool: String,
        /// What was wrong with the arguments
        reason: String,
    },
    /// The model named a tool that does not exist
    #[display("Unknown tool: {}", _0)]
    UnknownTool(String),
    /// A batch result did not line up with its input
    #[display("Expected {} items but received {}", expected, actual)]
    LengthMismatch {
        /// Number of items sent
        expected: usize,
        /// Number of items returned
        actual: usize,
    },
    /// The response could not be read as the JSON shape that was asked for
    #[display("Malformed response: {}", _0)]
    MalformedResponse(String),
}

/// Protocol error with source location tracking.
///
/// # Examples
///
/// ```
/// use scenewright_error::{ProtocolError, ProtocolErrorKind};
///
/// let err = ProtocolError::new(ProtocolErrorKind::LengthMismatch { expected: 2, actual: 1 });
/// assert!(format!("{}", err).contains("Expected 2 items but received 1"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Protocol Error: {} at line {} in {}", kind, line, file)]
pub struct ProtocolError {
    /// The specific error condition
    pub kind: ProtocolErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ProtocolError {
    /// Create a new ProtocolError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ProtocolErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
