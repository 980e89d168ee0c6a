//! Speaker record error types.

/// Speaker record error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SpeakerErrorKind {
    /// No speaker with this id
    #[display("Speaker {} not found", _0)]
    NotFound(i32),
    /// The referenced activity does not exist
    #[display("Activity {} not found", _0)]
    ActivityNotFound(i32),
    /// The record store could not complete the operation
    #[display("Record store unavailable: {}", _0)]
    StoreUnavailable(String),
}

/// Speaker record error with location tracking.
///
/// # Examples
///
/// ```
/// use podium_error::{SpeakerError, SpeakerErrorKind};
///
/// let err = SpeakerError::new(SpeakerErrorKind::NotFound(3));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Speaker Error: {} at line {} in {}", kind, line, file)]
pub struct SpeakerError {
    /// The kind of error that occurred
    pub kind: SpeakerErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SpeakerError {
    /// Create a new speaker error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SpeakerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
