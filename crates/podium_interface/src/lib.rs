//! Collaborator contracts consumed by the speaker service.
//!
//! The lifecycle code only ever talks to a [`MediaStore`] and a
//! [`SpeakerRepository`] through these traits; concrete backends live in
//! `podium_storage` and `podium_database`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod media;
mod repository;

pub use media::{AssetPolicy, AssetPolicyBuilder, AssetPolicyBuilderError, MediaStore};
pub use repository::{SpeakerFilter, SpeakerRepository};
