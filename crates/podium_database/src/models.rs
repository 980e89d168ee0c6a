//! Diesel row models for the speakers table.

use crate::schema::speakers;
use diesel::prelude::*;
use podium_core::{classify, Speaker, SpeakerDraft, SpeakerProfile};
use podium_error::PodiumResult;

/// A row of the `speakers` table.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = speakers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SpeakerRow {
    pub id: i32,
    pub name: String,
    pub role: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub activity_id: Option<i32>,
    pub sort_order: i32,
    pub linkedin: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub youtube: Option<String>,
}

impl SpeakerRow {
    /// Convert to the domain type, classifying the stored image.
    ///
    /// # Errors
    ///
    /// `InvalidReference` if the image column holds an unclassifiable value.
    pub fn into_speaker(self) -> PodiumResult<Speaker> {
        let image = classify(self.image.as_deref())?;
        let profile = SpeakerProfile::new(
            self.name,
            self.role,
            self.description,
            self.activity_id,
            self.sort_order,
            self.linkedin,
            self.facebook,
            self.instagram,
            self.youtube,
        );
        Ok(Speaker::new(self.id, profile, image))
    }
}

/// Every column but `id`, used both for inserts and full-row updates.
///
/// `None` is written as NULL on update so cleared fields stay cleared.
#[derive(Debug, Clone, PartialEq, Insertable, AsChangeset)]
#[diesel(table_name = speakers)]
#[diesel(treat_none_as_null = true)]
pub struct SpeakerColumns {
    pub name: String,
    pub role: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub activity_id: Option<i32>,
    pub sort_order: i32,
    pub linkedin: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub youtube: Option<String>,
}

impl From<&SpeakerDraft> for SpeakerColumns {
    fn from(draft: &SpeakerDraft) -> Self {
        Self::from_parts(draft.profile(), draft.image().to_stored())
    }
}

impl From<&Speaker> for SpeakerColumns {
    fn from(speaker: &Speaker) -> Self {
        Self::from_parts(speaker.profile(), speaker.image().to_stored())
    }
}

impl SpeakerColumns {
    fn from_parts(profile: &SpeakerProfile, image: Option<String>) -> Self {
        Self {
            name: profile.name().clone(),
            role: profile.role().clone(),
            description: profile.description().clone(),
            image,
            activity_id: *profile.activity_id(),
            sort_order: *profile.order(),
            linkedin: profile.linkedin().clone(),
            facebook: profile.facebook().clone(),
            instagram: profile.instagram().clone(),
            youtube: profile.youtube().clone(),
        }
    }
}
