//! Image reference lifecycle.
//!
//! [`plan`] is the whole transition table: given the stored reference and
//! what the request asked for, it says which media-store call (if any) is
//! needed and what the speaker's image becomes. [`ImageLifecycleCoordinator`]
//! executes a plan against a [`MediaStore`].

use podium_core::{alias_hint, classify, AssetId, ExternalUrl, ImageReference};
use podium_error::PodiumResult;
use podium_interface::{AssetPolicy, MediaStore};
use std::sync::Arc;

/// What a request asks to happen to a speaker's image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedImage {
    /// The image field was not part of the request.
    Unspecified,
    /// Drop the current image.
    Remove,
    /// Point at an externally hosted image.
    External(ExternalUrl),
    /// Keep the image in managed storage. Carries a client-supplied id when
    /// the value was one; `None` for any other non-link value. The id is
    /// never adopted: a fresh asset is registered when needed.
    Managed(Option<AssetId>),
}

impl RequestedImage {
    /// Interpret the image value of a create request.
    ///
    /// No value means "store it for me", so an empty image becomes a managed
    /// request rather than an empty one.
    ///
    /// # Errors
    ///
    /// `InvalidReference` for a non-empty unclassifiable value.
    pub fn for_create(raw: Option<&str>) -> PodiumResult<Self> {
        Ok(match classify(raw)? {
            ImageReference::Empty => RequestedImage::Managed(None),
            ImageReference::ManagedAsset(id) => RequestedImage::Managed(Some(id)),
            ImageReference::ExternalLink(url) => RequestedImage::External(url),
        })
    }

    /// Interpret the image field of an update request.
    ///
    /// `None` is an absent field, `Some(None)` and `Some(Some(""))` are an
    /// explicit removal. Any other value that is not a link asks for managed
    /// storage: an existing managed image is kept, a link is replaced by a
    /// fresh asset.
    pub fn for_update(field: Option<Option<&str>>) -> Self {
        let Some(raw) = field else {
            return RequestedImage::Unspecified;
        };
        match classify(raw) {
            Ok(ImageReference::Empty) => RequestedImage::Remove,
            Ok(ImageReference::ManagedAsset(id)) => RequestedImage::Managed(Some(id)),
            Ok(ImageReference::ExternalLink(url)) => RequestedImage::External(url),
            Err(_) => RequestedImage::Managed(None),
        }
    }
}

/// Side effect required to move from one reference to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changes.
    Keep,
    /// Store a new value; the media store is not involved.
    Set(ImageReference),
    /// Register a fresh asset and store its id.
    Register,
    /// Unregister `asset` (forced), then store `then`.
    Unregister {
        /// Asset being released
        asset: AssetId,
        /// Value stored once the asset is gone
        then: ImageReference,
    },
}

/// Decide the transition for `previous` × `requested`.
///
/// | previous | requested | transition |
/// |---|---|---|
/// | any | Unspecified | Keep |
/// | Empty | Remove | Keep |
/// | Empty | External(u) | Set(u) |
/// | Empty | Managed | Register |
/// | Managed(a) | External(u) | Unregister a, then u |
/// | Managed(a) | Managed (same id, other id, non-link value) | Keep |
/// | Managed(a) | Remove | Unregister a, then Empty |
/// | External(u) | External(u) | Keep |
/// | External(u) | External(v) | Set(v) |
/// | External(u) | Managed (any id or non-link value) | Register |
/// | External(u) | Remove | Set(Empty) |
pub fn plan(previous: &ImageReference, requested: &RequestedImage) -> Transition {
    use ImageReference as Prev;
    use RequestedImage as Req;

    match (previous, requested) {
        (_, Req::Unspecified) => Transition::Keep,

        (Prev::Empty, Req::Remove) => Transition::Keep,
        (Prev::Empty, Req::External(url)) => {
            Transition::Set(ImageReference::ExternalLink(url.clone()))
        }
        (Prev::Empty, Req::Managed(_)) => Transition::Register,

        (Prev::ManagedAsset(asset), Req::External(url)) => Transition::Unregister {
            asset: *asset,
            then: ImageReference::ExternalLink(url.clone()),
        },
        (Prev::ManagedAsset(_), Req::Managed(_)) => Transition::Keep,
        (Prev::ManagedAsset(asset), Req::Remove) => Transition::Unregister {
            asset: *asset,
            then: ImageReference::Empty,
        },

        (Prev::ExternalLink(current), Req::External(url)) if current == url => Transition::Keep,
        (Prev::ExternalLink(_), Req::External(url)) => {
            Transition::Set(ImageReference::ExternalLink(url.clone()))
        }
        (Prev::ExternalLink(_), Req::Managed(_)) => Transition::Register,
        (Prev::ExternalLink(_), Req::Remove) => Transition::Set(ImageReference::Empty),
    }
}

/// Outcome of [`ImageLifecycleCoordinator::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Reference to persist
    pub image: ImageReference,
    /// Asset registered by this resolution
    pub registered: Option<AssetId>,
    /// Asset released by this resolution
    pub unregistered: Option<AssetId>,
}

impl Resolution {
    fn unchanged(image: ImageReference) -> Self {
        Self {
            image,
            registered: None,
            unregistered: None,
        }
    }
}

/// Executes planned transitions against the media store.
///
/// Stateless between calls: everything it needs arrives as arguments.
#[derive(Clone)]
pub struct ImageLifecycleCoordinator {
    store: Arc<dyn MediaStore>,
    policy: AssetPolicy,
}

impl std::fmt::Debug for ImageLifecycleCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLifecycleCoordinator")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ImageLifecycleCoordinator {
    /// Coordinator registering new assets under `policy`.
    pub fn new(store: Arc<dyn MediaStore>, policy: AssetPolicy) -> Self {
        Self { store, policy }
    }

    /// Policy used for new registrations.
    pub fn policy(&self) -> &AssetPolicy {
        &self.policy
    }

    /// Resolve `requested` against `previous`, performing at most one store call.
    ///
    /// `name_hint` seeds the alias of a fresh registration.
    ///
    /// # Errors
    ///
    /// Any failure of the store call. Nothing has changed when this returns `Err`.
    #[tracing::instrument(skip(self, previous, requested))]
    pub async fn resolve(
        &self,
        previous: &ImageReference,
        requested: &RequestedImage,
        name_hint: &str,
    ) -> PodiumResult<Resolution> {
        let transition = plan(previous, requested);
        tracing::debug!(?previous, ?requested, ?transition, "Planned image transition");

        match transition {
            Transition::Keep => {
                if let (ImageReference::ManagedAsset(current), RequestedImage::Managed(Some(echo))) =
                    (previous, requested)
                {
                    if current != echo {
                        tracing::warn!(
                            current = %current,
                            requested = %echo,
                            "Ignoring requested asset id, keeping current managed image"
                        );
                    }
                }
                Ok(Resolution::unchanged(previous.clone()))
            }
            Transition::Set(image) => Ok(Resolution::unchanged(image)),
            Transition::Register => {
                let alias = alias_hint(name_hint);
                let id = self.store.register(&self.policy, &alias).await?;
                tracing::info!(asset_id = %id, alias = %alias, "Registered speaker image");
                Ok(Resolution {
                    image: ImageReference::ManagedAsset(id),
                    registered: Some(id),
                    unregistered: None,
                })
            }
            Transition::Unregister { asset, then } => {
                self.store.unregister(&asset, true).await?;
                tracing::info!(asset_id = %asset, "Unregistered speaker image");
                Ok(Resolution {
                    image: then,
                    registered: None,
                    unregistered: Some(asset),
                })
            }
        }
    }

    /// Release an asset registered by a resolution whose write then failed.
    pub async fn release(&self, asset: &AssetId) -> PodiumResult<()> {
        self.store.unregister(asset, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "11111111-1111-1111-1111-111111111111";
    const B: &str = "22222222-2222-2222-2222-222222222222";

    fn reference(raw: &str) -> ImageReference {
        classify(Some(raw)).unwrap()
    }

    fn asset(raw: &str) -> AssetId {
        *reference(raw).asset_id().unwrap()
    }

    fn url(raw: &str) -> ExternalUrl {
        ExternalUrl::parse(raw).unwrap()
    }

    #[test]
    fn unspecified_never_changes_anything() {
        for previous in [
            ImageReference::Empty,
            reference(A),
            reference("https://x.com/a.png"),
        ] {
            assert_eq!(plan(&previous, &RequestedImage::Unspecified), Transition::Keep);
        }
    }

    #[test]
    fn from_empty() {
        let empty = ImageReference::Empty;
        assert_eq!(plan(&empty, &RequestedImage::Remove), Transition::Keep);
        assert_eq!(
            plan(&empty, &RequestedImage::External(url("https://x.com/a.png"))),
            Transition::Set(reference("https://x.com/a.png"))
        );
        assert_eq!(plan(&empty, &RequestedImage::Managed(None)), Transition::Register);
        assert_eq!(
            plan(&empty, &RequestedImage::Managed(Some(asset(A)))),
            Transition::Register
        );
    }

    #[test]
    fn from_managed() {
        let previous = reference(A);
        assert_eq!(
            plan(&previous, &RequestedImage::External(url("https://x.com/a.png"))),
            Transition::Unregister {
                asset: asset(A),
                then: reference("https://x.com/a.png"),
            }
        );
        assert_eq!(
            plan(&previous, &RequestedImage::Managed(Some(asset(A)))),
            Transition::Keep
        );
        assert_eq!(
            plan(&previous, &RequestedImage::Managed(Some(asset(B)))),
            Transition::Keep
        );
        assert_eq!(
            plan(&previous, &RequestedImage::Remove),
            Transition::Unregister {
                asset: asset(A),
                then: ImageReference::Empty,
            }
        );
    }

    #[test]
    fn from_external() {
        let previous = reference("https://x.com/a.png");
        assert_eq!(
            plan(&previous, &RequestedImage::External(url("https://x.com/a.png"))),
            Transition::Keep
        );
        assert_eq!(
            plan(&previous, &RequestedImage::External(url("https://y.com/b.png"))),
            Transition::Set(reference("https://y.com/b.png"))
        );
        assert_eq!(plan(&previous, &RequestedImage::Managed(None)), Transition::Register);
        assert_eq!(
            plan(&previous, &RequestedImage::Remove),
            Transition::Set(ImageReference::Empty)
        );
    }

    #[test]
    fn create_requests() {
        assert_eq!(
            RequestedImage::for_create(None).unwrap(),
            RequestedImage::Managed(None)
        );
        assert_eq!(
            RequestedImage::for_create(Some("")).unwrap(),
            RequestedImage::Managed(None)
        );
        assert_eq!(
            RequestedImage::for_create(Some(A)).unwrap(),
            RequestedImage::Managed(Some(asset(A)))
        );
        assert!(RequestedImage::for_create(Some("portrait.png")).is_err());
    }

    #[test]
    fn update_requests() {
        assert_eq!(
            RequestedImage::for_update(None),
            RequestedImage::Unspecified
        );
        assert_eq!(
            RequestedImage::for_update(Some(None)),
            RequestedImage::Remove
        );
        assert_eq!(
            RequestedImage::for_update(Some(Some(""))),
            RequestedImage::Remove
        );
        assert_eq!(
            RequestedImage::for_update(Some(Some("https://x.com/a.png"))),
            RequestedImage::External(url("https://x.com/a.png"))
        );
        assert_eq!(
            RequestedImage::for_update(Some(Some("abc"))),
            RequestedImage::Managed(None)
        );
        assert_eq!(
            RequestedImage::for_update(Some(Some(A))),
            RequestedImage::Managed(Some(asset(A)))
        );
    }
}
