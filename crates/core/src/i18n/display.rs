//! Session-wide display language for rendering UI chrome.

use super::text::{LangCode, Locale};

/// The language a client session renders in.
///
/// Initialised from the persisted preference, then the browser default, then
/// German. Independent of the content fallback, which is always Arabic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLanguage {
    locale: Locale,
}

impl DisplayLanguage {
    pub const DEFAULT: Locale = Locale::De;

    pub fn initial(preference: Option<&str>, browser_default: Option<&str>) -> Self {
        let locale = [preference, browser_default]
            .into_iter()
            .flatten()
            .find_map(Locale::from_tag)
            .unwrap_or(Self::DEFAULT);
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn switch(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn is_rtl(&self) -> bool {
        self.locale == Locale::Ar
    }

    /// Value to send as `Accept-Language` when fetching content.
    pub fn accept_language(&self) -> LangCode {
        self.locale.into()
    }
}

impl Default for DisplayLanguage {
    fn default() -> Self {
        Self {
            locale: Self::DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_preference_wins() {
        let lang = DisplayLanguage::initial(Some("ar"), Some("de-DE"));
        assert_eq!(lang.locale(), Locale::Ar);
        assert!(lang.is_rtl());
    }

    #[test]
    fn browser_default_used_when_preference_unsupported() {
        let lang = DisplayLanguage::initial(Some("fr"), Some("ar-EG"));
        assert_eq!(lang.locale(), Locale::Ar);
    }

    #[test]
    fn german_is_the_last_resort() {
        assert_eq!(DisplayLanguage::initial(None, Some("en-US")).locale(), Locale::De);
        assert_eq!(DisplayLanguage::initial(None, None), DisplayLanguage::default());
    }

    #[test]
    fn switching_changes_the_content_request_language() {
        let mut lang = DisplayLanguage::default();
        assert_eq!(lang.accept_language().as_str(), "de");
        lang.switch(Locale::Ar);
        assert_eq!(lang.accept_language().as_str(), "ar");
    }
}
