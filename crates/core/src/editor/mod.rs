//! Edit-session state for the admin city editor.
//!
//! A [`CityDraft`] holds one city being edited. Sections and activities get
//! a local [`DraftKey`] so the UI can address and drag them before they
//! exist in the store. Keys never leave the draft: [`CityDraft::to_payload`]
//! strips them and the array order becomes the persisted order.

use crate::document::{Activity, City, CityPatch, NewCity, Section};
use crate::i18n::{Locale, LocalizedText};

/// Session-local identity of a section or activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DraftKey(u64);

/// Top-level localized fields of a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityField {
    Name,
    IntroText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionField {
    Title,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityField {
    Day,
    Activity,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("reorder must list every current entry exactly once")]
    ReorderMismatch,
    #[error("position {0} is out of range")]
    OutOfRange(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSection {
    pub key: DraftKey,
    pub section: Section,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftActivity {
    pub key: DraftKey,
    pub activity: Activity,
}

/// A city form in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityDraft {
    pub name: LocalizedText,
    pub slug: String,
    pub hero_image: String,
    pub intro_text: LocalizedText,
    sections: Vec<DraftSection>,
    activities: Vec<DraftActivity>,
    next_key: u64,
}

impl Default for CityDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl CityDraft {
    /// Empty skeleton for a new city.
    pub fn new() -> Self {
        Self {
            name: LocalizedText::default(),
            slug: String::new(),
            hero_image: String::new(),
            intro_text: LocalizedText::default(),
            sections: Vec::new(),
            activities: Vec::new(),
            next_key: 0,
        }
    }

    /// Start editing a stored city. Sections without an order get their
    /// one-based position.
    pub fn from_city(city: &City) -> Self {
        let mut draft = Self {
            name: city.name.clone(),
            slug: city.slug.clone(),
            hero_image: city.hero_image.clone(),
            intro_text: city.intro_text.clone(),
            ..Self::new()
        };

        for (index, section) in city.sections.iter().enumerate() {
            let mut section = section.clone();
            section.order = Some(
                section
                    .order
                    .filter(|order| *order != 0)
                    .unwrap_or(position_rank(index)),
            );
            let key = draft.fresh_key();
            draft.sections.push(DraftSection { key, section });
        }
        for activity in &city.activities {
            let key = draft.fresh_key();
            draft.activities.push(DraftActivity {
                key,
                activity: activity.clone(),
            });
        }
        draft
    }

    fn fresh_key(&mut self) -> DraftKey {
        let key = DraftKey(self.next_key);
        self.next_key += 1;
        key
    }

    pub fn sections(&self) -> &[DraftSection] {
        &self.sections
    }

    pub fn activities(&self) -> &[DraftActivity] {
        &self.activities
    }

    pub fn set_text(&mut self, field: CityField, locale: Locale, value: impl Into<String>) {
        match field {
            CityField::Name => self.name.set(locale, value),
            CityField::IntroText => self.intro_text.set(locale, value),
        }
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.slug = slug.into();
    }

    pub fn set_hero_image(&mut self, url: impl Into<String>) {
        self.hero_image = url.into();
    }

    // Sections

    /// Append an empty section ranked after the existing ones.
    pub fn add_section(&mut self) -> DraftKey {
        let key = self.fresh_key();
        let section = Section {
            order: Some(position_rank(self.sections.len())),
            ..Section::default()
        };
        self.sections.push(DraftSection { key, section });
        key
    }

    pub fn update_section(
        &mut self,
        key: DraftKey,
        field: SectionField,
        locale: Locale,
        value: impl Into<String>,
    ) {
        if let Some(entry) = self.sections.iter_mut().find(|s| s.key == key) {
            match field {
                SectionField::Title => entry.section.title.set(locale, value),
                SectionField::Content => entry.section.content.set(locale, value),
            }
        }
    }

    pub fn set_section_image(&mut self, key: DraftKey, url: impl Into<String>) {
        if let Some(entry) = self.sections.iter_mut().find(|s| s.key == key) {
            entry.section.image = url.into();
        }
    }

    pub fn remove_section(&mut self, key: DraftKey) {
        self.sections.retain(|s| s.key != key);
    }

    /// Put sections in the given key order and renumber `order` from 1.
    pub fn reorder_sections(&mut self, keys: &[DraftKey]) -> Result<(), DraftError> {
        match arrange(std::mem::take(&mut self.sections), keys, |s| s.key) {
            Ok(arranged) => {
                self.sections = arranged;
                self.renumber_sections();
                Ok(())
            }
            Err((original, err)) => {
                self.sections = original;
                Err(err)
            }
        }
    }

    /// Drag a section from one position to another and renumber.
    pub fn move_section(&mut self, from: usize, to: usize) -> Result<(), DraftError> {
        move_entry(&mut self.sections, from, to)?;
        self.renumber_sections();
        Ok(())
    }

    fn renumber_sections(&mut self) {
        for (index, entry) in self.sections.iter_mut().enumerate() {
            entry.section.order = Some(position_rank(index));
        }
    }

    // Activities

    pub fn add_activity(&mut self) -> DraftKey {
        let key = self.fresh_key();
        self.activities.push(DraftActivity {
            key,
            activity: Activity::default(),
        });
        key
    }

    pub fn update_activity(
        &mut self,
        key: DraftKey,
        field: ActivityField,
        locale: Locale,
        value: impl Into<String>,
    ) {
        if let Some(entry) = self.activities.iter_mut().find(|a| a.key == key) {
            match field {
                ActivityField::Day => entry.activity.day.set(locale, value),
                ActivityField::Activity => entry.activity.activity.set(locale, value),
            }
        }
    }

    pub fn remove_activity(&mut self, key: DraftKey) {
        self.activities.retain(|a| a.key != key);
    }

    pub fn reorder_activities(&mut self, keys: &[DraftKey]) -> Result<(), DraftError> {
        match arrange(std::mem::take(&mut self.activities), keys, |a| a.key) {
            Ok(arranged) => {
                self.activities = arranged;
                Ok(())
            }
            Err((original, err)) => {
                self.activities = original;
                Err(err)
            }
        }
    }

    pub fn move_activity(&mut self, from: usize, to: usize) -> Result<(), DraftError> {
        move_entry(&mut self.activities, from, to)
    }

    // Submission

    /// Create payload with local keys stripped.
    pub fn to_payload(&self) -> NewCity {
        NewCity {
            name: self.name.clone(),
            slug: self.slug.clone(),
            hero_image: self.hero_image.clone(),
            intro_text: self.intro_text.clone(),
            sections: self.sections.iter().map(|s| s.section.clone()).collect(),
            activities: self.activities.iter().map(|a| a.activity.clone()).collect(),
        }
    }

    /// Update payload replacing every field of the stored city.
    pub fn to_patch(&self) -> CityPatch {
        self.to_payload().into()
    }
}

fn position_rank(index: usize) -> i64 {
    i64::try_from(index).map_or(i64::MAX, |i| i + 1)
}

/// Reorder `entries` to follow `keys`. On mismatch the untouched entries are
/// handed back with the error.
fn arrange<T>(
    mut entries: Vec<T>,
    keys: &[DraftKey],
    key_of: impl Fn(&T) -> DraftKey,
) -> Result<Vec<T>, (Vec<T>, DraftError)> {
    let mut wanted = keys.to_vec();
    wanted.sort_unstable();
    wanted.dedup();
    let mut current: Vec<DraftKey> = entries.iter().map(&key_of).collect();
    current.sort_unstable();
    if wanted.len() != keys.len() || wanted != current {
        return Err((entries, DraftError::ReorderMismatch));
    }

    let mut arranged = Vec::with_capacity(entries.len());
    for key in keys {
        if let Some(pos) = entries.iter().position(|e| key_of(e) == *key) {
            arranged.push(entries.swap_remove(pos));
        }
    }
    Ok(arranged)
}

fn move_entry<T>(entries: &mut Vec<T>, from: usize, to: usize) -> Result<(), DraftError> {
    if from >= entries.len() {
        return Err(DraftError::OutOfRange(from));
    }
    if to >= entries.len() {
        return Err(DraftError::OutOfRange(to));
    }
    let entry = entries.remove(from);
    entries.insert(to, entry);
    Ok(())
}
