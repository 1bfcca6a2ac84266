/// Document validation utilities.
use thiserror::Error;

use crate::i18n::{Locale, LocalizedText};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{entity} validation failed: {} is required", .paths.join(", "))]
    MissingFields {
        entity: &'static str,
        paths: Vec<String>,
    },
    #[error("invalid document id: {0}")]
    InvalidId(String),
}

/// Collects missing required fields for one document.
#[derive(Debug)]
pub(crate) struct RequiredFields {
    entity: &'static str,
    missing: Vec<String>,
}

impl RequiredFields {
    pub(crate) fn new(entity: &'static str) -> Self {
        Self {
            entity,
            missing: Vec::new(),
        }
    }

    pub(crate) fn text(&mut self, path: &str, value: &str) -> &mut Self {
        if value.is_empty() {
            self.missing.push(path.to_string());
        }
        self
    }

    /// Both locales must be non-empty. A legacy plain string satisfies both
    /// when it is non-empty.
    pub(crate) fn localized(&mut self, path: &str, value: &LocalizedText) -> &mut Self {
        match value {
            LocalizedText::Bilingual(text) => {
                for locale in text.missing_locales() {
                    self.missing.push(format!("{path}.{locale}"));
                }
            }
            LocalizedText::Plain(text) => {
                self.text(path, text);
            }
        }
        self
    }

    /// Write-side rule for a required field: both locales non-empty and no
    /// legacy plain string.
    pub(crate) fn bilingual(&mut self, path: &str, value: &LocalizedText) -> &mut Self {
        match value {
            LocalizedText::Bilingual(_) => self.localized(path, value),
            LocalizedText::Plain(_) => self.every_locale(path),
        }
    }

    /// Write-side rule for an optional field: may be empty, but must carry
    /// both locale keys.
    pub(crate) fn bilingual_shape(&mut self, path: &str, value: &LocalizedText) -> &mut Self {
        match value {
            LocalizedText::Bilingual(_) => self,
            LocalizedText::Plain(_) => self.every_locale(path),
        }
    }

    fn every_locale(&mut self, path: &str) -> &mut Self {
        for locale in Locale::ALL {
            self.missing.push(format!("{path}.{locale}"));
        }
        self
    }

    pub(crate) fn finish(&mut self) -> Result<(), ValidationError> {
        if self.missing.is_empty() {
            return Ok(());
        }
        Err(ValidationError::MissingFields {
            entity: self.entity,
            paths: std::mem::take(&mut self.missing),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_every_missing_path() {
        let err = RequiredFields::new("City")
            .localized("name", &LocalizedText::bilingual("", ""))
            .text("slug", "goslar")
            .text("heroImage", "")
            .finish()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "City validation failed: name.ar, name.de, heroImage is required"
        );
    }

    #[test]
    fn plain_text_counts_for_both_locales() {
        RequiredFields::new("City")
            .localized("name", &LocalizedText::Plain("Goslar".to_string()))
            .finish()
            .unwrap();
    }

    #[test]
    fn plain_text_is_rejected_on_write() {
        let err = RequiredFields::new("City")
            .bilingual("name", &LocalizedText::Plain("Goslar".to_string()))
            .bilingual_shape("sections.0.title", &LocalizedText::Plain("T".to_string()))
            .bilingual_shape("sections.0.content", &LocalizedText::bilingual("", ""))
            .finish()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "City validation failed: name.ar, name.de, sections.0.title.ar, \
             sections.0.title.de is required"
        );
    }
}
