//! Speaker record types.
//!
//! Everything except the image is pass-through data: the lifecycle code never
//! inspects it beyond the name used for alias hints.

use crate::ImageReference;
use derive_getters::Getters;
use serde::{Deserialize, Deserializer, Serialize};

/// Descriptive attributes of a speaker.
///
/// Build one field by field with [`SpeakerProfileBuilder`], or positionally
/// with `SpeakerProfile::new` when every column is at hand.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_builder::Builder,
    derive_new::new,
)]
#[builder(setter(into))]
pub struct SpeakerProfile {
    /// Display name (required)
    name: String,
    /// Role or title
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    role: Option<String>,
    /// Biography
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    description: Option<String>,
    /// Activity the speaker presents at
    #[builder(default, setter(strip_option))]
    #[serde(default)]
    activity_id: Option<i32>,
    /// Position in listings, lower first
    #[builder(default)]
    #[serde(default)]
    order: i32,
    /// LinkedIn profile
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    linkedin: Option<String>,
    /// Facebook profile
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    facebook: Option<String>,
    /// Instagram profile
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    instagram: Option<String>,
    /// YouTube channel
    #[builder(default, setter(into, strip_option))]
    #[serde(default)]
    youtube: Option<String>,
}

impl SpeakerProfile {
    /// Apply the non-image fields of a patch, returning the updated profile.
    pub fn patched(&self, patch: &SpeakerPatch) -> Self {
        let mut next = self.clone();
        if let Some(name) = &patch.name {
            next.name = name.clone();
        }
        if let Some(role) = &patch.role {
            next.role = role.clone();
        }
        if let Some(description) = &patch.description {
            next.description = description.clone();
        }
        if let Some(activity_id) = patch.activity_id {
            next.activity_id = activity_id;
        }
        if let Some(order) = patch.order {
            next.order = order;
        }
        if let Some(linkedin) = &patch.linkedin {
            next.linkedin = linkedin.clone();
        }
        if let Some(facebook) = &patch.facebook {
            next.facebook = facebook.clone();
        }
        if let Some(instagram) = &patch.instagram {
            next.instagram = instagram.clone();
        }
        if let Some(youtube) = &patch.youtube {
            next.youtube = youtube.clone();
        }
        next
    }
}

/// A persisted speaker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Speaker {
    /// Store-assigned id
    id: i32,
    /// Image under lifecycle control
    image: ImageReference,
    /// Pass-through attributes
    #[serde(flatten)]
    profile: SpeakerProfile,
}

impl Speaker {
    /// Assemble a speaker from its parts.
    pub fn new(id: i32, profile: SpeakerProfile, image: ImageReference) -> Self {
        Self { id, image, profile }
    }

    /// Copy with a different image.
    pub fn with_image(&self, image: ImageReference) -> Self {
        Self {
            image,
            ..self.clone()
        }
    }

    /// Copy with a different profile.
    pub fn with_profile(&self, profile: SpeakerProfile) -> Self {
        Self {
            profile,
            ..self.clone()
        }
    }
}

/// A speaker that has not been stored yet, with its image already resolved.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SpeakerDraft {
    profile: SpeakerProfile,
    image: ImageReference,
}

impl SpeakerDraft {
    /// Create a draft.
    pub fn new(profile: SpeakerProfile, image: ImageReference) -> Self {
        Self { profile, image }
    }
}

/// Input for creating a speaker.
///
/// `image` is the raw value from the request; the service classifies it.
/// Leaving it empty asks for a managed asset to be registered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct NewSpeaker {
    #[serde(flatten)]
    profile: SpeakerProfile,
    #[serde(default)]
    image: Option<String>,
}

impl NewSpeaker {
    /// Create an input.
    pub fn new(profile: SpeakerProfile, image: Option<String>) -> Self {
        Self { profile, image }
    }
}

/// Partial update of a speaker.
///
/// Outer `None` means the field was absent from the request. For nullable
/// fields `Some(None)` clears the value; for `image` it requests removal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SpeakerPatch {
    /// New name
    #[serde(default)]
    pub name: Option<String>,
    /// New role
    #[serde(default, deserialize_with = "present")]
    pub role: Option<Option<String>>,
    /// New biography
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    /// New activity association
    #[serde(default, deserialize_with = "present")]
    pub activity_id: Option<Option<i32>>,
    /// New position
    #[serde(default)]
    pub order: Option<i32>,
    /// New LinkedIn profile
    #[serde(default, deserialize_with = "present")]
    pub linkedin: Option<Option<String>>,
    /// New Facebook profile
    #[serde(default, deserialize_with = "present")]
    pub facebook: Option<Option<String>>,
    /// New Instagram profile
    #[serde(default, deserialize_with = "present")]
    pub instagram: Option<Option<String>>,
    /// New YouTube channel
    #[serde(default, deserialize_with = "present")]
    pub youtube: Option<Option<String>>,
    /// Raw image value, classified by the service
    #[serde(default, deserialize_with = "present")]
    pub image: Option<Option<String>>,
}

// A field that is present deserializes to Some, even when its value is null.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let absent: SpeakerPatch = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert_eq!(absent.image, None);

        let null: SpeakerPatch = serde_json::from_str(r#"{"image": null}"#).unwrap();
        assert_eq!(null.image, Some(None));

        let set: SpeakerPatch =
            serde_json::from_str(r#"{"image": "https://x.com/a.png"}"#).unwrap();
        assert_eq!(set.image, Some(Some("https://x.com/a.png".to_string())));
    }

    #[test]
    fn patched_only_touches_present_fields() {
        let profile = SpeakerProfileBuilder::default()
            .name("Ada")
            .role("Keynote")
            .linkedin("https://linkedin.com/in/ada")
            .order(2)
            .build()
            .unwrap();

        let patch = SpeakerPatch {
            role: Some(None),
            order: Some(5),
            ..Default::default()
        };
        let next = profile.patched(&patch);

        assert_eq!(next.name(), "Ada");
        assert_eq!(next.role(), &None);
        assert_eq!(*next.order(), 5);
        assert_eq!(next.linkedin().as_deref(), Some("https://linkedin.com/in/ada"));
    }

    #[test]
    fn speaker_serializes_image_as_stored_string() {
        let profile = SpeakerProfileBuilder::default().name("Ada").build().unwrap();
        let speaker = Speaker::new(1, profile, ImageReference::Empty);
        let json = serde_json::to_value(&speaker).unwrap();
        assert_eq!(json["image"], serde_json::Value::Null);
        assert_eq!(json["name"], "Ada");

        let back: Speaker = serde_json::from_value(json).unwrap();
        assert_eq!(back, speaker);
    }
}
