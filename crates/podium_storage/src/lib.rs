//! Media store backends for speaker images.
//!
//! Two implementations of [`podium_interface::MediaStore`]:
//!
//! - [`InMemoryMediaStore`] keeps registrations in a `HashMap`, counts calls
//!   and can be switched unavailable, which makes it the store of choice for
//!   lifecycle tests.
//! - [`FileSystemMediaStore`] gives every asset its own directory holding an
//!   `asset.json` record and the uploaded bytes, named by SHA-256.
//!
//! # Example
//!
//! ```rust
//! use podium_interface::{AssetPolicyBuilder, MediaStore};
//! use podium_storage::FileSystemMediaStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileSystemMediaStore::new("/tmp/podium-media")?;
//! let policy = AssetPolicyBuilder::default()
//!     .max_size_bytes(10 * 1024 * 1024)
//!     .allowed_extensions([".jpg", ".png"])
//!     .build()?;
//!
//! let id = store.register(&policy, "ada-lovelace").await?;
//! store.upload(&id, "portrait.png", b"...png bytes...").await?;
//! let bytes = store.retrieve(&id).await?;
//! assert_eq!(bytes, b"...png bytes...");
//! store.unregister(&id, true).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod filesystem;
mod memory;

pub use asset::{AssetRecord, StoredContent};
pub use filesystem::FileSystemMediaStore;
pub use memory::InMemoryMediaStore;
pub use podium_error::{StorageError, StorageErrorKind};
