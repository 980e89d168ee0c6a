//! Image reference value types.

use crate::classify;
use podium_error::PodiumError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of an asset owned by the media store.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct AssetId(Uuid);

impl AssetId {
    /// Generate a fresh random id.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

/// An http(s) link with a non-empty host, kept exactly as supplied.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct ExternalUrl(String);

impl ExternalUrl {
    /// Parse a link, returning `None` unless the scheme is http/https and a host is present.
    pub fn parse(raw: &str) -> Option<Self> {
        let parsed = url::Url::parse(raw).ok()?;
        let scheme_ok = matches!(parsed.scheme(), "http" | "https");
        let host_ok = parsed.host_str().is_some_and(|h| !h.is_empty());
        (scheme_ok && host_ok).then(|| Self(raw.to_string()))
    }

    /// The link text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The value held by a speaker's image column.
///
/// Serializes to the persisted form: the hyphenated UUID for managed assets,
/// the link text for external images and `null` when empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Option<String>", try_from = "Option<String>")]
pub enum ImageReference {
    /// No image.
    #[default]
    Empty,
    /// An asset registered with the media store.
    ManagedAsset(AssetId),
    /// An externally hosted image.
    ExternalLink(ExternalUrl),
}

impl ImageReference {
    /// The string written to the image column, `None` for [`ImageReference::Empty`].
    pub fn to_stored(&self) -> Option<String> {
        match self {
            ImageReference::Empty => None,
            ImageReference::ManagedAsset(id) => Some(id.as_uuid().hyphenated().to_string()),
            ImageReference::ExternalLink(url) => Some(url.as_str().to_string()),
        }
    }

    /// The managed asset id, if any.
    pub fn asset_id(&self) -> Option<&AssetId> {
        match self {
            ImageReference::ManagedAsset(id) => Some(id),
            _ => None,
        }
    }

    /// True for [`ImageReference::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, ImageReference::Empty)
    }
}

impl From<ImageReference> for Option<String> {
    fn from(reference: ImageReference) -> Self {
        reference.to_stored()
    }
}

impl TryFrom<Option<String>> for ImageReference {
    type Error = PodiumError;

    fn try_from(raw: Option<String>) -> Result<Self, Self::Error> {
        classify(raw.as_deref())
    }
}
