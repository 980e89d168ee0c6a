//! Core data types for the Podium speaker service.
//!
//! The central type is [`ImageReference`], the closed set of forms a speaker's
//! image column may hold, produced once by [`classify`] and threaded through
//! the rest of the workspace as typed data.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod classify;
mod image;
mod slug;
mod speaker;
mod telemetry;

pub use classify::classify;
pub use image::{AssetId, ExternalUrl, ImageReference};
pub use slug::{alias_hint, slugify};
pub use speaker::{
    NewSpeaker, Speaker, SpeakerDraft, SpeakerPatch, SpeakerProfile, SpeakerProfileBuilder,
    SpeakerProfileBuilderError,
};
pub use telemetry::{init_telemetry, TelemetryGuard};
