//! Speaker records with lifecycle-managed images.
//!
//! A speaker's image is either empty, a link to an externally hosted file, or
//! an asset owned by a [`MediaStore`](podium_interface::MediaStore).
//! [`SpeakerService`] keeps the two consistent: creating a speaker without a
//! link registers a managed asset, switching to a link or deleting the
//! speaker unregisters it, and a failed write never leaves a fresh asset
//! behind.
//!
//! # Example
//!
//! ```no_run
//! use podium_core::{NewSpeaker, SpeakerProfileBuilder};
//! use podium_speakers::{InMemorySpeakerRepository, PodiumConfig, SpeakerService};
//! use podium_storage::InMemoryMediaStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PodiumConfig::load()?;
//! let service = SpeakerService::from_config(
//!     Arc::new(InMemorySpeakerRepository::new()),
//!     Arc::new(InMemoryMediaStore::new()),
//!     &config,
//! )?;
//!
//! let profile = SpeakerProfileBuilder::default().name("Ada Lovelace").build()?;
//! let speaker = service.create(&NewSpeaker::new(profile, None)).await?;
//! assert!(speaker.image().asset_id().is_some());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod in_memory_repository;
mod lifecycle;
mod locks;
mod service;

pub use config::{ImagePolicyConfig, PodiumConfig, SpeakersConfig, StorageConfig};
pub use in_memory_repository::InMemorySpeakerRepository;
pub use lifecycle::{plan, ImageLifecycleCoordinator, RequestedImage, Resolution, Transition};
pub use locks::{RecordGuard, RecordLocks};
pub use service::SpeakerService;
