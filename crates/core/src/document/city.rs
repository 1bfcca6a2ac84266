use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id::new_document_id;
use super::validate::{RequiredFields, ValidationError};
use crate::i18n::text::null_as_default;
use crate::i18n::LocalizedText;

/// A narrative content block on a city page.
///
/// `order` is a display rank kept for older clients; array position is the
/// real ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: LocalizedText,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: LocalizedText,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// One itinerary entry. Ordered by array position only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub day: LocalizedText,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activity: LocalizedText,
}

/// A persisted city page in its full, all-locale shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: LocalizedText,
    pub slug: String,
    pub hero_image: String,
    pub intro_text: LocalizedText,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl City {
    /// Check the fields the store requires before every write.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_city(&self.name, &self.slug, &self.hero_image, &self.intro_text)
    }

    /// Overwrite every field the patch carries. Timestamps are left to the
    /// store.
    pub fn apply(&mut self, patch: CityPatch) {
        let CityPatch {
            name,
            slug,
            hero_image,
            intro_text,
            sections,
            activities,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(slug) = slug {
            self.slug = slug;
        }
        if let Some(hero_image) = hero_image {
            self.hero_image = hero_image;
        }
        if let Some(intro_text) = intro_text {
            self.intro_text = intro_text;
        }
        if let Some(sections) = sections {
            self.sections = sections;
        }
        if let Some(activities) = activities {
            self.activities = activities;
        }
    }
}

/// Create payload: a full multi-locale city without id or timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: LocalizedText,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hero_image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub intro_text: LocalizedText,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: Vec<Section>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activities: Vec<Activity>,
}

impl NewCity {
    /// Incoming text must be bilingual; the legacy plain-string form is only
    /// tolerated on rows already stored.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut required = RequiredFields::new("City");
        required
            .bilingual("name", &self.name)
            .text("slug", &self.slug)
            .text("heroImage", &self.hero_image)
            .bilingual("introText", &self.intro_text);
        check_entries(&mut required, &self.sections, &self.activities);
        required.finish()
    }

    /// Stamp a new id and timestamps.
    pub fn into_city(self, now: DateTime<Utc>) -> City {
        City {
            id: new_document_id(),
            name: self.name,
            slug: self.slug,
            hero_image: self.hero_image,
            intro_text: self.intro_text,
            sections: self.sections,
            activities: self.activities,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Update payload. `None` (field absent or `null`) leaves the stored value
/// alone; any present value, including `""` and `[]`, replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro_text: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activities: Option<Vec<Activity>>,
}

impl CityPatch {
    /// Same write-side rules as [`NewCity::validate`], applied to the fields
    /// the patch carries.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut required = RequiredFields::new("City");
        if let Some(name) = &self.name {
            required.bilingual("name", name);
        }
        if let Some(intro_text) = &self.intro_text {
            required.bilingual("introText", intro_text);
        }
        check_entries(
            &mut required,
            self.sections.as_deref().unwrap_or_default(),
            self.activities.as_deref().unwrap_or_default(),
        );
        required.finish()
    }
}

impl From<NewCity> for CityPatch {
    fn from(city: NewCity) -> Self {
        Self {
            name: Some(city.name),
            slug: Some(city.slug),
            hero_image: Some(city.hero_image),
            intro_text: Some(city.intro_text),
            sections: Some(city.sections),
            activities: Some(city.activities),
        }
    }
}

fn validate_city(
    name: &LocalizedText,
    slug: &str,
    hero_image: &str,
    intro_text: &LocalizedText,
) -> Result<(), ValidationError> {
    RequiredFields::new("City")
        .localized("name", name)
        .text("slug", slug)
        .text("heroImage", hero_image)
        .localized("introText", intro_text)
        .finish()
}

fn check_entries(required: &mut RequiredFields, sections: &[Section], activities: &[Activity]) {
    for (index, section) in sections.iter().enumerate() {
        required
            .bilingual_shape(&format!("sections.{index}.title"), &section.title)
            .bilingual_shape(&format!("sections.{index}.content"), &section.content);
    }
    for (index, activity) in activities.iter().enumerate() {
        required
            .bilingual_shape(&format!("activities.{index}.day"), &activity.day)
            .bilingual_shape(&format!("activities.{index}.activity"), &activity.activity);
    }
}
