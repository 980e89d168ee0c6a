//! Podium - speaker records with lifecycle-managed images
//!
//! A speaker's image is either an externally hosted link or an asset owned by
//! a media store. Podium decides, on every create, update and delete, whether
//! to register a new asset, release an orphaned one, or keep what is there.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use podium::{
//!     FileSystemMediaStore, InMemorySpeakerRepository, NewSpeaker, PodiumConfig,
//!     SpeakerProfileBuilder, SpeakerService,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let _telemetry = podium::init_telemetry("podium")?;
//!     let config = PodiumConfig::load()?;
//!     let store = FileSystemMediaStore::new(config.storage().media_root())?;
//!     let service = SpeakerService::from_config(
//!         Arc::new(InMemorySpeakerRepository::new()),
//!         Arc::new(store),
//!         &config,
//!     )?;
//!
//!     let profile = SpeakerProfileBuilder::default()
//!         .name("Grace Hopper")
//!         .role("Keynote")
//!         .build()?;
//!     let speaker = service
//!         .create(&NewSpeaker::new(profile, Some("https://cdn.example.com/grace.jpg".into())))
//!         .await?;
//!     println!("{:?}", speaker.image());
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `database` - PostgreSQL speaker repository
//!
//! # Architecture
//!
//! - `podium_error` - Error types
//! - `podium_core` - Image references, classifier, speaker data types
//! - `podium_interface` - MediaStore and SpeakerRepository traits
//! - `podium_storage` - In-memory and filesystem media stores
//! - `podium_database` - PostgreSQL integration
//! - `podium_speakers` - Image lifecycle coordination and the speaker service
//!
//! This crate (`podium`) re-exports everything for convenience.

pub use podium_core::*;
pub use podium_error::*;
pub use podium_interface::*;
pub use podium_speakers::{
    plan, ImageLifecycleCoordinator, ImagePolicyConfig, InMemorySpeakerRepository,
    PodiumConfig, RecordGuard, RecordLocks, RequestedImage, Resolution, SpeakerService,
    SpeakersConfig, StorageConfig, Transition,
};
pub use podium_storage::{AssetRecord, FileSystemMediaStore, InMemoryMediaStore, StoredContent};

#[cfg(feature = "database")]
pub use podium_database::{
    establish_pool, run_migrations, PgPool, PostgresSpeakerRepository, SpeakerColumns,
    SpeakerRow,
};
