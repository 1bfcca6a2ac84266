//! Language-projected ("flattened") views of content documents.
//!
//! A flattened view is a copy of the document with every localized field
//! resolved to one string. Everything else passes through unchanged and the
//! source document is never touched.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::city::{Activity, City, Section};
use super::video::Video;
use crate::i18n::LangCode;

/// Project a document onto a single language.
pub trait Flatten {
    type Output: Serialize;

    fn flatten(&self, lang: &LangCode) -> Self::Output;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatSection {
    pub title: String,
    pub content: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatActivity {
    pub day: String,
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatCity {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub hero_image: String,
    pub intro_text: String,
    pub sections: Vec<FlatSection>,
    pub activities: Vec<FlatActivity>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatVideo {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flatten for Section {
    type Output = FlatSection;

    fn flatten(&self, lang: &LangCode) -> FlatSection {
        FlatSection {
            title: self.title.resolve(lang).to_owned(),
            content: self.content.resolve(lang).to_owned(),
            image: self.image.clone(),
            order: self.order,
        }
    }
}

impl Flatten for Activity {
    type Output = FlatActivity;

    fn flatten(&self, lang: &LangCode) -> FlatActivity {
        FlatActivity {
            day: self.day.resolve(lang).to_owned(),
            activity: self.activity.resolve(lang).to_owned(),
        }
    }
}

impl Flatten for City {
    type Output = FlatCity;

    fn flatten(&self, lang: &LangCode) -> FlatCity {
        FlatCity {
            id: self.id,
            name: self.name.resolve(lang).to_owned(),
            slug: self.slug.clone(),
            hero_image: self.hero_image.clone(),
            intro_text: self.intro_text.resolve(lang).to_owned(),
            sections: self.sections.iter().map(|s| s.flatten(lang)).collect(),
            activities: self.activities.iter().map(|a| a.flatten(lang)).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Flatten for Video {
    type Output = FlatVideo;

    fn flatten(&self, lang: &LangCode) -> FlatVideo {
        FlatVideo {
            id: self.id,
            title: self.title.resolve(lang).to_owned(),
            url: self.url.clone(),
            description: self.description.resolve(lang).to_owned(),
            thumbnail: self.thumbnail.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::city::NewCity;
    use crate::document::video::NewVideo;
    use crate::i18n::{LocalizedText, Locale};

    fn hannover() -> City {
        NewCity {
            name: LocalizedText::bilingual("هانوفر", "Hannover"),
            slug: "hannover".to_string(),
            hero_image: "/hannover.jpg".to_string(),
            intro_text: LocalizedText::bilingual("عاصمة ولاية", ""),
            sections: vec![Section {
                title: LocalizedText::bilingual("الأعمال", "Wirtschaft"),
                content: LocalizedText::bilingual("محتوى", "Inhalt"),
                image: "/business.jpg".to_string(),
                order: Some(3),
            }],
            activities: vec![Activity {
                day: LocalizedText::bilingual("اليوم 1", "Tag 1"),
                activity: LocalizedText::Plain("Messe".to_string()),
            }],
        }
        .into_city(Utc::now())
    }

    /// Rebuild a document from a flattened view, carrying each resolved
    /// string as legacy plain text.
    fn unflatten(flat: &FlatCity, source: &City) -> City {
        City {
            name: LocalizedText::Plain(flat.name.clone()),
            intro_text: LocalizedText::Plain(flat.intro_text.clone()),
            sections: flat
                .sections
                .iter()
                .map(|s| Section {
                    title: LocalizedText::Plain(s.title.clone()),
                    content: LocalizedText::Plain(s.content.clone()),
                    image: s.image.clone(),
                    order: s.order,
                })
                .collect(),
            activities: flat
                .activities
                .iter()
                .map(|a| Activity {
                    day: LocalizedText::Plain(a.day.clone()),
                    activity: LocalizedText::Plain(a.activity.clone()),
                })
                .collect(),
            ..source.clone()
        }
    }

    #[test]
    fn city_fields_resolve_to_requested_language() {
        let city = hannover();
        let flat = city.flatten(&Locale::De.into());

        assert_eq!(flat.name, "Hannover");
        assert_eq!(flat.intro_text, "عاصمة ولاية");
        assert_eq!(flat.sections[0].title, "Wirtschaft");
        assert_eq!(flat.sections[0].content, "Inhalt");
        assert_eq!(flat.activities[0].day, "Tag 1");
        assert_eq!(flat.activities[0].activity, "Messe");
    }

    #[test]
    fn non_localized_fields_pass_through() {
        let city = hannover();
        let flat = city.flatten(&LangCode::new("de"));

        assert_eq!(flat.id, city.id);
        assert_eq!(flat.slug, city.slug);
        assert_eq!(flat.hero_image, city.hero_image);
        assert_eq!(flat.sections[0].image, "/business.jpg");
        assert_eq!(flat.sections[0].order, Some(3));
        assert_eq!(flat.created_at, city.created_at);
        assert_eq!(flat.updated_at, city.updated_at);
    }

    #[test]
    fn flattening_leaves_the_source_untouched() {
        let city = hannover();
        let snapshot = city.clone();
        let _ = city.flatten(&LangCode::new("de"));
        assert_eq!(city, snapshot);
    }

    #[test]
    fn flattening_a_flattened_view_is_a_no_op() {
        let city = hannover();
        let lang = LangCode::new("de");
        let once = city.flatten(&lang);
        let twice = unflatten(&once, &city).flatten(&lang);
        assert_eq!(once, twice);
    }

    #[test]
    fn unsupported_language_falls_back_to_arabic_everywhere() {
        let flat = hannover().flatten(&LangCode::new("en"));
        assert_eq!(flat.name, "هانوفر");
        assert_eq!(flat.sections[0].title, "الأعمال");
        assert_eq!(flat.activities[0].day, "اليوم 1");
    }

    #[test]
    fn video_flattens_title_and_description() {
        let video = NewVideo {
            title: LocalizedText::bilingual("جولة", "Rundgang"),
            url: "https://www.youtube.com/watch?v=82Hkshs8VyE".to_string(),
            description: LocalizedText::bilingual("وصف", ""),
            thumbnail: None,
        }
        .into_video(Utc::now());

        let flat = video.flatten(&LangCode::new("de"));
        assert_eq!(flat.title, "Rundgang");
        assert_eq!(flat.description, "وصف");
        assert_eq!(flat.url, video.url);
        assert_eq!(flat.thumbnail, video.thumbnail);
    }
}
