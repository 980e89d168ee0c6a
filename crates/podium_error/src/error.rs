//! Top-level error wrapper types.

#[cfg(feature = "database")]
use crate::DatabaseError;
use crate::{
    ConfigError, ImageError, ImageErrorKind, SpeakerError, SpeakerErrorKind, StorageError,
    StorageErrorKind,
};

/// Every error a Podium crate can surface.
///
/// # Examples
///
/// ```
/// use podium_error::{PodiumError, SpeakerError, SpeakerErrorKind};
///
/// let err: PodiumError = SpeakerError::new(SpeakerErrorKind::NotFound(1)).into();
/// assert!(format!("{}", err).contains("Speaker 1 not found"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum PodiumErrorKind {
    /// Image reference error
    #[from(ImageError)]
    Image(ImageError),
    /// Speaker record error
    #[from(SpeakerError)]
    Speaker(SpeakerError),
    /// Media store error
    #[from(StorageError)]
    Storage(StorageError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
}

/// Coarse classification used by callers to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ErrorClass {
    /// The target record or asset does not exist
    #[display("not found")]
    NotFound,
    /// The request itself was invalid
    #[display("bad request")]
    BadRequest,
    /// A collaborator could not be reached
    #[display("unavailable")]
    Unavailable,
    /// Anything else
    #[display("internal")]
    Internal,
}

/// Podium error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Podium Error: {}", _0)]
pub struct PodiumError(Box<PodiumErrorKind>);

impl PodiumError {
    /// Create a new error from a kind.
    pub fn new(kind: PodiumErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PodiumErrorKind {
        &self.0
    }

    /// Classify the error for the caller-facing surface.
    ///
    /// # Examples
    ///
    /// ```
    /// use podium_error::{ErrorClass, ImageError, ImageErrorKind, PodiumError};
    ///
    /// let err: PodiumError = ImageError::new(ImageErrorKind::NoImagePresent(2)).into();
    /// assert_eq!(err.class(), ErrorClass::NotFound);
    /// ```
    pub fn class(&self) -> ErrorClass {
        match self.kind() {
            PodiumErrorKind::Image(e) => match e.kind {
                ImageErrorKind::InvalidReference(_) => ErrorClass::BadRequest,
                ImageErrorKind::NoImagePresent(_) => ErrorClass::NotFound,
                ImageErrorKind::ExternalNotRemovable(_) => ErrorClass::BadRequest,
            },
            PodiumErrorKind::Speaker(e) => match e.kind {
                SpeakerErrorKind::NotFound(_) | SpeakerErrorKind::ActivityNotFound(_) => {
                    ErrorClass::NotFound
                }
                SpeakerErrorKind::StoreUnavailable(_) => ErrorClass::Unavailable,
            },
            PodiumErrorKind::Storage(e) => match e.kind {
                StorageErrorKind::QuotaExceeded(_)
                | StorageErrorKind::InvalidExtension(_)
                | StorageErrorKind::TooLarge { .. }
                | StorageErrorKind::RewriteForbidden(_) => ErrorClass::BadRequest,
                StorageErrorKind::NotFound(_) => ErrorClass::NotFound,
                StorageErrorKind::Unavailable(_) => ErrorClass::Unavailable,
                _ => ErrorClass::Internal,
            },
            PodiumErrorKind::Config(_) => ErrorClass::Internal,
            #[cfg(feature = "database")]
            PodiumErrorKind::Database(_) => ErrorClass::Unavailable,
        }
    }
}

// Generic From implementation for any type that converts to PodiumErrorKind
impl<T> From<T> for PodiumError
where
    T: Into<PodiumErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Podium operations.
pub type PodiumResult<T> = std::result::Result<T, PodiumError>;
