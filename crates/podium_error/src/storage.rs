//! Media store error types.

/// Kinds of media store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// The store has no room for another asset
    #[display("Quota exceeded: {}", _0)]
    QuotaExceeded(String),
    /// File extension is not allowed by the asset policy
    #[display("Extension not allowed: {}", _0)]
    InvalidExtension(String),
    /// Upload is larger than the asset policy permits
    #[display("Upload of {} bytes exceeds limit of {} bytes", size, limit)]
    TooLarge {
        /// Size of the rejected upload
        size: u64,
        /// Maximum size allowed by the policy
        limit: u64,
    },
    /// Content already exists and the policy forbids rewrites
    #[display("Asset {} does not allow rewrites", _0)]
    RewriteForbidden(String),
    /// Asset not found
    #[display("Asset not found: {}", _0)]
    NotFound(String),
    /// Failed to create storage directory
    #[display("Failed to create storage directory: {}", _0)]
    DirectoryCreation(String),
    /// Failed to write file
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// Failed to read file
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// Stored content does not match its recorded hash
    #[display("Content hash mismatch: {}", _0)]
    HashMismatch(String),
    /// Asset metadata could not be encoded or decoded
    #[display("Invalid asset metadata: {}", _0)]
    Metadata(String),
    /// Storage backend is unavailable
    #[display("Storage unavailable: {}", _0)]
    Unavailable(String),
}

/// Media store error with location tracking.
///
/// # Examples
///
/// ```
/// use podium_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("1111".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
