//! Classification of raw image column values.

use crate::{AssetId, ExternalUrl, ImageReference};
use podium_error::{ImageError, ImageErrorKind, PodiumResult};
use uuid::Uuid;

/// Classify a raw image value.
///
/// `None` and `""` are [`ImageReference::Empty`], anything `Uuid::parse_str`
/// accepts is a managed asset, an http(s) URL with a host is an external link.
/// Any other non-empty string fails with `ImageErrorKind::InvalidReference`.
///
/// # Examples
///
/// ```
/// use podium_core::{classify, ImageReference};
///
/// assert_eq!(classify(None).unwrap(), ImageReference::Empty);
/// assert!(matches!(
///     classify(Some("https://cdn.example.com/pic.jpg")).unwrap(),
///     ImageReference::ExternalLink(_)
/// ));
/// assert!(classify(Some("pic.jpg")).is_err());
/// ```
pub fn classify(raw: Option<&str>) -> PodiumResult<ImageReference> {
    let raw = match raw {
        None | Some("") => return Ok(ImageReference::Empty),
        Some(raw) => raw,
    };

    if let Ok(uuid) = Uuid::parse_str(raw) {
        return Ok(ImageReference::ManagedAsset(AssetId::from(uuid)));
    }

    if let Some(url) = ExternalUrl::parse(raw) {
        return Ok(ImageReference::ExternalLink(url));
    }

    Err(ImageError::new(ImageErrorKind::InvalidReference(raw.to_string())).into())
}
