//! Speaker record store contract.

use async_trait::async_trait;
use podium_core::{Speaker, SpeakerDraft};
use podium_error::PodiumResult;

/// Filter for listing speakers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpeakerFilter {
    /// Only speakers associated with this activity
    pub activity_id: Option<i32>,
}

impl SpeakerFilter {
    /// Speakers of one activity.
    pub fn activity(activity_id: i32) -> Self {
        Self {
            activity_id: Some(activity_id),
        }
    }
}

/// Persistence of speaker rows.
///
/// The image column is written exactly as `ImageReference::to_stored` renders
/// it. Implementations do not interpret it.
#[async_trait]
pub trait SpeakerRepository: Send + Sync {
    /// Load a speaker, `None` if the id is unknown.
    async fn get(&self, id: i32) -> PodiumResult<Option<Speaker>>;

    /// List speakers ordered by `order`, then `name`.
    async fn list(&self, filter: SpeakerFilter) -> PodiumResult<Vec<Speaker>>;

    /// Insert one speaker and return it with its assigned id.
    async fn insert(&self, draft: &SpeakerDraft) -> PodiumResult<Speaker>;

    /// Insert several speakers; either all rows are written or none.
    async fn insert_many(&self, drafts: &[SpeakerDraft]) -> PodiumResult<Vec<Speaker>>;

    /// Overwrite every column of an existing speaker.
    ///
    /// Fails with `SpeakerErrorKind::NotFound` if the id is unknown.
    async fn update(&self, speaker: &Speaker) -> PodiumResult<Speaker>;

    /// Delete a speaker and return the removed row.
    ///
    /// Fails with `SpeakerErrorKind::NotFound` if the id is unknown.
    async fn delete(&self, id: i32) -> PodiumResult<Speaker>;

    /// Whether an activity with this id exists.
    async fn activity_exists(&self, activity_id: i32) -> PodiumResult<bool>;
}
