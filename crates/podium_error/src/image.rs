//! Image reference error types.

/// Image reference error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ImageErrorKind {
    /// Non-empty value that is neither an asset id nor an http(s) link
    #[display("Invalid image reference: {:?}", _0)]
    InvalidReference(String),
    /// Remove-image was requested for a speaker without an image
    #[display("Speaker {} has no image", _0)]
    NoImagePresent(i32),
    /// Remove-image was requested for a speaker whose image is an external link
    #[display("Speaker {} has an external image that cannot be removed from storage", _0)]
    ExternalNotRemovable(i32),
}

/// Image reference error with location tracking.
///
/// # Examples
///
/// ```
/// use podium_error::{ImageError, ImageErrorKind};
///
/// let err = ImageError::new(ImageErrorKind::NoImagePresent(7));
/// assert!(format!("{}", err).contains("has no image"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Image Error: {} at line {} in {}", kind, line, file)]
pub struct ImageError {
    /// The kind of error that occurred
    pub kind: ImageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ImageError {
    /// Create a new image error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ImageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
