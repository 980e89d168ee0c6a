//! In-memory implementation of SpeakerRepository.
//!
//! Speakers live in a HashMap behind an RwLock. Useful for tests and for
//! running the service without a database.

use async_trait::async_trait;
use podium_core::{Speaker, SpeakerDraft};
use podium_error::{PodiumResult, SpeakerError, SpeakerErrorKind};
use podium_interface::{SpeakerFilter, SpeakerRepository};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory speaker repository.
///
/// All data is lost when the last clone is dropped.
///
/// # Example
/// ```no_run
/// use podium_speakers::InMemorySpeakerRepository;
///
/// #[tokio::main]
/// async fn main() {
///     let repo = InMemorySpeakerRepository::new();
///     repo.add_activity(1).await;
///     assert!(repo.is_empty().await);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySpeakerRepository {
    state: Arc<RwLock<RepositoryState>>,
}

#[derive(Debug, Default)]
struct RepositoryState {
    speakers: HashMap<i32, Speaker>,
    last_id: i32,
    activities: HashSet<i32>,
    fail_writes: bool,
}

impl RepositoryState {
    fn check_writable(&self) -> PodiumResult<()> {
        if self.fail_writes {
            return Err(SpeakerError::new(SpeakerErrorKind::StoreUnavailable(
                "in-memory repository is rejecting writes".to_string(),
            ))
            .into());
        }
        Ok(())
    }

    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

impl InMemorySpeakerRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make an activity id known.
    pub async fn add_activity(&self, activity_id: i32) {
        self.state.write().await.activities.insert(activity_id);
    }

    /// While set, every write fails with `StoreUnavailable` (for testing).
    pub async fn set_fail_writes(&self, fail: bool) {
        self.state.write().await.fail_writes = fail;
    }

    /// Get the number of stored speakers (for testing).
    pub async fn len(&self) -> usize {
        self.state.read().await.speakers.len()
    }

    /// Check if the repository is empty (for testing).
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.speakers.is_empty()
    }

    /// Clear all speakers, keeping known activities (for testing).
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.speakers.clear();
        state.last_id = 0;
    }
}

#[async_trait]
impl SpeakerRepository for InMemorySpeakerRepository {
    async fn get(&self, id: i32) -> PodiumResult<Option<Speaker>> {
        Ok(self.state.read().await.speakers.get(&id).cloned())
    }

    async fn list(&self, filter: SpeakerFilter) -> PodiumResult<Vec<Speaker>> {
        let state = self.state.read().await;
        let mut speakers: Vec<Speaker> = state
            .speakers
            .values()
            .filter(|s| match filter.activity_id {
                Some(activity_id) => *s.profile().activity_id() == Some(activity_id),
                None => true,
            })
            .cloned()
            .collect();

        speakers.sort_by(|a, b| {
            a.profile()
                .order()
                .cmp(b.profile().order())
                .then_with(|| a.profile().name().cmp(b.profile().name()))
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(speakers)
    }

    async fn insert(&self, draft: &SpeakerDraft) -> PodiumResult<Speaker> {
        let mut state = self.state.write().await;
        state.check_writable()?;

        let id = state.next_id();
        let speaker = Speaker::new(id, draft.profile().clone(), draft.image().clone());
        state.speakers.insert(id, speaker.clone());
        Ok(speaker)
    }

    async fn insert_many(&self, drafts: &[SpeakerDraft]) -> PodiumResult<Vec<Speaker>> {
        let mut state = self.state.write().await;
        state.check_writable()?;

        let mut inserted = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let id = state.next_id();
            let speaker = Speaker::new(id, draft.profile().clone(), draft.image().clone());
            state.speakers.insert(id, speaker.clone());
            inserted.push(speaker);
        }
        Ok(inserted)
    }

    async fn update(&self, speaker: &Speaker) -> PodiumResult<Speaker> {
        let mut state = self.state.write().await;
        state.check_writable()?;

        match state.speakers.get_mut(speaker.id()) {
            Some(slot) => {
                *slot = speaker.clone();
                Ok(speaker.clone())
            }
            None => Err(SpeakerError::new(SpeakerErrorKind::NotFound(*speaker.id())).into()),
        }
    }

    async fn delete(&self, id: i32) -> PodiumResult<Speaker> {
        let mut state = self.state.write().await;
        state.check_writable()?;

        state
            .speakers
            .remove(&id)
            .ok_or_else(|| SpeakerError::new(SpeakerErrorKind::NotFound(id)).into())
    }

    async fn activity_exists(&self, activity_id: i32) -> PodiumResult<bool> {
        Ok(self.state.read().await.activities.contains(&activity_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_core::{ImageReference, SpeakerProfileBuilder};

    fn draft(name: &str, order: i32) -> SpeakerDraft {
        let profile = SpeakerProfileBuilder::default()
            .name(name)
            .order(order)
            .build()
            .unwrap();
        SpeakerDraft::new(profile, ImageReference::Empty)
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let repo = InMemorySpeakerRepository::new();
        let a = repo.insert(&draft("Ada", 0)).await.unwrap();
        let b = repo.insert(&draft("Grace", 0)).await.unwrap();
        assert_eq!(*a.id(), 1);
        assert_eq!(*b.id(), 2);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_list_orders_by_order_then_name() {
        let repo = InMemorySpeakerRepository::new();
        repo.insert(&draft("Zoe", 1)).await.unwrap();
        repo.insert(&draft("Bob", 2)).await.unwrap();
        repo.insert(&draft("Amy", 1)).await.unwrap();

        let names: Vec<String> = repo
            .list(SpeakerFilter::default())
            .await
            .unwrap()
            .iter()
            .map(|s| s.profile().name().clone())
            .collect();
        assert_eq!(names, vec!["Amy", "Zoe", "Bob"]);
    }

    #[tokio::test]
    async fn test_failing_writes_leave_state_untouched() {
        let repo = InMemorySpeakerRepository::new();
        let stored = repo.insert(&draft("Ada", 0)).await.unwrap();
        repo.set_fail_writes(true).await;

        assert!(repo.insert(&draft("Grace", 0)).await.is_err());
        assert!(repo.delete(*stored.id()).await.is_err());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let repo = InMemorySpeakerRepository::new();
        let profile = SpeakerProfileBuilder::default().name("Ada").build().unwrap();
        let ghost = Speaker::new(42, profile, ImageReference::Empty);
        assert!(repo.update(&ghost).await.is_err());
    }
}
