//! Speaker record service.

use crate::{ImageLifecycleCoordinator, PodiumConfig, RecordLocks, RequestedImage, Resolution};
use podium_core::{AssetId, ImageReference, NewSpeaker, Speaker, SpeakerDraft, SpeakerPatch};
use podium_error::{ImageError, ImageErrorKind, PodiumResult, SpeakerError, SpeakerErrorKind};
use podium_interface::{AssetPolicy, MediaStore, SpeakerFilter, SpeakerRepository};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Create, update and delete speakers while keeping their images consistent
/// with the media store.
///
/// Every mutation of one speaker runs under that speaker's lock, so the
/// read-resolve-write sequence never interleaves with another request for the
/// same id.
#[derive(Clone)]
pub struct SpeakerService {
    repository: Arc<dyn SpeakerRepository>,
    images: ImageLifecycleCoordinator,
    locks: RecordLocks,
}

impl std::fmt::Debug for SpeakerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeakerService")
            .field("images", &self.images)
            .field("locks", &self.locks)
            .finish_non_exhaustive()
    }
}

impl SpeakerService {
    /// Service over the given collaborators.
    pub fn new(
        repository: Arc<dyn SpeakerRepository>,
        store: Arc<dyn MediaStore>,
        policy: AssetPolicy,
    ) -> Self {
        Self {
            repository,
            images: ImageLifecycleCoordinator::new(store, policy),
            locks: RecordLocks::new(),
        }
    }

    /// Service whose registration policy comes from `config`.
    ///
    /// # Errors
    ///
    /// `ConfigError` if the configured image policy is invalid.
    pub fn from_config(
        repository: Arc<dyn SpeakerRepository>,
        store: Arc<dyn MediaStore>,
        config: &PodiumConfig,
    ) -> PodiumResult<Self> {
        let policy = config.speakers().image().asset_policy()?;
        Ok(Self::new(repository, store, policy))
    }

    /// The coordinator used for image transitions.
    pub fn images(&self) -> &ImageLifecycleCoordinator {
        &self.images
    }

    /// Load one speaker.
    ///
    /// # Errors
    ///
    /// `SpeakerErrorKind::NotFound` if the id is unknown.
    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> PodiumResult<Speaker> {
        self.load(id).await
    }

    /// List speakers ordered by `order`, then `name`.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: SpeakerFilter) -> PodiumResult<Vec<Speaker>> {
        self.repository.list(filter).await
    }

    /// Create a speaker.
    ///
    /// An empty image registers a fresh managed asset; a link is stored as is.
    ///
    /// # Errors
    ///
    /// `InvalidReference` or `ActivityNotFound` before any side effect, a
    /// media store failure, or the repository failure (the fresh asset is
    /// released first).
    #[instrument(skip(self, input), fields(name = %input.profile().name()))]
    pub async fn create(&self, input: &NewSpeaker) -> PodiumResult<Speaker> {
        let requested = RequestedImage::for_create(input.image().as_deref())?;
        self.ensure_activity(*input.profile().activity_id()).await?;

        let resolution = self
            .images
            .resolve(&ImageReference::Empty, &requested, input.profile().name())
            .await?;

        let draft = SpeakerDraft::new(input.profile().clone(), resolution.image.clone());
        match self.repository.insert(&draft).await {
            Ok(speaker) => {
                info!(speaker_id = speaker.id(), image = ?speaker.image(), "Created speaker");
                Ok(speaker)
            }
            Err(e) => {
                self.compensate(resolution.registered).await;
                Err(e)
            }
        }
    }

    /// Create several speakers in one repository write.
    ///
    /// Either every speaker is stored or none is, and no asset registered for
    /// the batch outlives a failure.
    ///
    /// # Errors
    ///
    /// As [`create`](Self::create), for the first failing input.
    #[instrument(skip(self, inputs), fields(count = inputs.len()))]
    pub async fn create_many(&self, inputs: &[NewSpeaker]) -> PodiumResult<Vec<Speaker>> {
        let requests = inputs
            .iter()
            .map(|input| RequestedImage::for_create(input.image().as_deref()))
            .collect::<PodiumResult<Vec<_>>>()?;

        let activities: BTreeSet<i32> = inputs
            .iter()
            .filter_map(|input| *input.profile().activity_id())
            .collect();
        for activity_id in activities {
            self.ensure_activity(Some(activity_id)).await?;
        }

        let mut registered = Vec::new();
        let mut drafts = Vec::with_capacity(inputs.len());
        for (input, requested) in inputs.iter().zip(&requests) {
            let resolution = match self
                .images
                .resolve(&ImageReference::Empty, requested, input.profile().name())
                .await
            {
                Ok(resolution) => resolution,
                Err(e) => {
                    self.compensate_all(&registered).await;
                    return Err(e);
                }
            };
            registered.extend(resolution.registered);
            drafts.push(SpeakerDraft::new(input.profile().clone(), resolution.image));
        }

        match self.repository.insert_many(&drafts).await {
            Ok(speakers) => {
                info!(count = speakers.len(), "Created speakers");
                Ok(speakers)
            }
            Err(e) => {
                self.compensate_all(&registered).await;
                Err(e)
            }
        }
    }

    /// Apply a partial update.
    ///
    /// The image field follows the lifecycle table; every other present
    /// field is written together with the resolved image. A value that is
    /// neither a link nor empty asks for managed storage.
    ///
    /// # Errors
    ///
    /// `NotFound` or `ActivityNotFound` before any side effect, a media store
    /// failure (nothing persisted), or the repository failure.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: &SpeakerPatch) -> PodiumResult<Speaker> {
        let _guard = self.locks.acquire(id).await;

        let current = self.load(id).await?;
        let requested =
            RequestedImage::for_update(patch.image.as_ref().map(|image| image.as_deref()));
        if let Some(activity_id) = patch.activity_id {
            self.ensure_activity(activity_id).await?;
        }

        let profile = current.profile().patched(patch);
        let resolution = self
            .images
            .resolve(current.image(), &requested, profile.name())
            .await?;

        let next = current.with_profile(profile).with_image(resolution.image.clone());
        self.persist(next, &resolution).await
    }

    /// Delete a speaker, releasing its managed image first.
    ///
    /// # Errors
    ///
    /// `NotFound`, or the media store failure (the speaker is not deleted).
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> PodiumResult<Speaker> {
        let _guard = self.locks.acquire(id).await;

        let current = self.load(id).await?;
        let resolution = self
            .images
            .resolve(
                current.image(),
                &RequestedImage::Remove,
                current.profile().name(),
            )
            .await?;

        match self.repository.delete(id).await {
            Ok(deleted) => {
                info!(speaker_id = id, "Deleted speaker");
                Ok(deleted)
            }
            Err(e) => {
                if let Some(asset) = resolution.unregistered {
                    error!(
                        speaker_id = id,
                        asset_id = %asset,
                        error = %e,
                        "Speaker delete failed after its image was unregistered"
                    );
                }
                Err(e)
            }
        }
    }

    /// Remove a speaker's managed image, leaving the speaker without one.
    ///
    /// # Errors
    ///
    /// `NotFound`, `NoImagePresent` for an empty image,
    /// `ExternalNotRemovable` for a link, or a media store failure.
    #[instrument(skip(self))]
    pub async fn remove_image(&self, id: i32) -> PodiumResult<Speaker> {
        let _guard = self.locks.acquire(id).await;

        let current = self.load(id).await?;
        match current.image() {
            ImageReference::Empty => {
                return Err(ImageError::new(ImageErrorKind::NoImagePresent(id)).into());
            }
            ImageReference::ExternalLink(_) => {
                return Err(ImageError::new(ImageErrorKind::ExternalNotRemovable(id)).into());
            }
            ImageReference::ManagedAsset(_) => {}
        }

        let resolution = self
            .images
            .resolve(
                current.image(),
                &RequestedImage::Remove,
                current.profile().name(),
            )
            .await?;

        let next = current.with_image(resolution.image.clone());
        self.persist(next, &resolution).await
    }

    async fn load(&self, id: i32) -> PodiumResult<Speaker> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| SpeakerError::new(SpeakerErrorKind::NotFound(id)).into())
    }

    async fn ensure_activity(&self, activity_id: Option<i32>) -> PodiumResult<()> {
        let Some(activity_id) = activity_id else {
            return Ok(());
        };
        if self.repository.activity_exists(activity_id).await? {
            Ok(())
        } else {
            Err(SpeakerError::new(SpeakerErrorKind::ActivityNotFound(activity_id)).into())
        }
    }

    async fn persist(&self, next: Speaker, resolution: &Resolution) -> PodiumResult<Speaker> {
        match self.repository.update(&next).await {
            Ok(speaker) => {
                info!(speaker_id = speaker.id(), image = ?speaker.image(), "Updated speaker");
                Ok(speaker)
            }
            Err(e) => {
                self.compensate(resolution.registered).await;
                if let Some(asset) = resolution.unregistered {
                    error!(
                        speaker_id = next.id(),
                        asset_id = %asset,
                        error = %e,
                        "Speaker write failed after its image was unregistered"
                    );
                }
                Err(e)
            }
        }
    }

    async fn compensate(&self, registered: Option<AssetId>) {
        if let Some(asset) = registered {
            self.compensate_all(&[asset]).await;
        }
    }

    async fn compensate_all(&self, registered: &[AssetId]) {
        for asset in registered {
            match self.images.release(asset).await {
                Ok(()) => debug!(asset_id = %asset, "Released asset after failed write"),
                Err(e) => error!(
                    asset_id = %asset,
                    error = %e,
                    "Failed to release asset after failed write"
                ),
            }
        }
    }
}
