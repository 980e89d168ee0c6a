//! Error types for the Podium speaker service.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use podium_error::{ImageError, ImageErrorKind, PodiumResult};
//!
//! fn check(raw: &str) -> PodiumResult<()> {
//!     Err(ImageError::new(ImageErrorKind::InvalidReference(raw.to_string())))?
//! }
//!
//! assert!(check("not-a-link").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
#[cfg(feature = "database")]
mod database;
mod error;
mod image;
mod speaker;
mod storage;

pub use config::ConfigError;
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{ErrorClass, PodiumError, PodiumErrorKind, PodiumResult};
pub use image::{ImageError, ImageErrorKind};
pub use speaker::{SpeakerError, SpeakerErrorKind};
pub use storage::{StorageError, StorageErrorKind};
