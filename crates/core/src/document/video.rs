use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id::new_document_id;
use super::validate::{RequiredFields, ValidationError};
use super::youtube;
use crate::i18n::text::null_as_default;
use crate::i18n::LocalizedText;

/// A persisted video entry. Videos are created and deleted, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: LocalizedText,
    pub url: String,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create payload for a video.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVideo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: LocalizedText,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl NewVideo {
    /// Title in both locales and the URL are required; the description is
    /// optional but must be bilingual when given.
    pub fn validate(&self) -> Result<(), ValidationError> {
        RequiredFields::new("Video")
            .bilingual("title", &self.title)
            .text("url", &self.url)
            .bilingual_shape("description", &self.description)
            .finish()
    }

    /// Stamp a new id and timestamps. Without an explicit thumbnail, a
    /// YouTube URL gets its preview image.
    pub fn into_video(self, now: DateTime<Utc>) -> Video {
        let thumbnail = self
            .thumbnail
            .filter(|thumbnail| !thumbnail.is_empty())
            .or_else(|| youtube::thumbnail_url(&self.url));

        Video {
            id: new_document_id(),
            title: self.title,
            url: self.url,
            description: self.description,
            thumbnail,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn title_locales_and_url_are_required() {
        let video: NewVideo = serde_json::from_value(json!({
            "title": { "ar": "فيديو" },
            "description": { "ar": "", "de": "" }
        }))
        .unwrap();

        assert_eq!(
            video.validate().unwrap_err().to_string(),
            "Video validation failed: title.de, url is required"
        );
    }

    #[test]
    fn youtube_thumbnail_is_derived_when_absent() {
        let video = NewVideo {
            title: LocalizedText::bilingual("فيديو", "Video"),
            url: "https://www.youtube.com/watch?v=pGIBJHQJcR8".to_string(),
            ..NewVideo::default()
        }
        .into_video(Utc::now());

        assert_eq!(
            video.thumbnail.as_deref(),
            Some("https://img.youtube.com/vi/pGIBJHQJcR8/mqdefault.jpg")
        );
    }

    #[test]
    fn explicit_thumbnail_is_kept() {
        let video = NewVideo {
            title: LocalizedText::bilingual("فيديو", "Video"),
            url: "https://www.youtube.com/watch?v=pGIBJHQJcR8".to_string(),
            thumbnail: Some("https://cdn.example.com/thumb.jpg".to_string()),
            ..NewVideo::default()
        }
        .into_video(Utc::now());

        assert_eq!(
            video.thumbnail.as_deref(),
            Some("https://cdn.example.com/thumb.jpg")
        );
    }
}
