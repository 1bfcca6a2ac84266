//! Picks the display string for a requested language.

use super::text::{BilingualText, LangCode, Locale, LocalizedText};

/// Resolve a stored text field to one display string.
///
/// - No value: `""`.
/// - Legacy plain string: returned unchanged.
/// - Bilingual: the requested locale, else Arabic, else `""`.
pub fn resolve(value: Option<&LocalizedText>, lang: &LangCode) -> String {
    match value {
        None => String::new(),
        Some(text) => text.resolve(lang).to_owned(),
    }
}

impl BilingualText {
    /// The string for `lang`, falling back to Arabic when it is empty or
    /// `lang` is not a supported locale.
    pub fn resolve(&self, lang: &LangCode) -> &str {
        let requested = lang.locale().map_or("", |locale| self.get(locale));
        if requested.is_empty() {
            self.get(Locale::FALLBACK)
        } else {
            requested
        }
    }
}

impl LocalizedText {
    pub fn resolve(&self, lang: &LangCode) -> &str {
        match self {
            LocalizedText::Bilingual(text) => text.resolve(lang),
            LocalizedText::Plain(text) => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(code: &str) -> LangCode {
        LangCode::new(code)
    }

    #[test]
    fn requested_locale_wins_when_present() {
        let text = LocalizedText::bilingual("سالزجيتر", "Salzgitter");
        assert_eq!(resolve(Some(&text), &lang("de")), "Salzgitter");
        assert_eq!(resolve(Some(&text), &lang("ar")), "سالزجيتر");
    }

    #[test]
    fn empty_requested_locale_falls_back_to_arabic() {
        let text = LocalizedText::bilingual("كوتن", "");
        assert_eq!(resolve(Some(&text), &lang("de")), "كوتن");
    }

    #[test]
    fn fallback_is_arabic_even_for_unsupported_codes() {
        let text = LocalizedText::bilingual("هالبرشتات", "Halberstadt");
        assert_eq!(resolve(Some(&text), &lang("en")), "هالبرشتات");
    }

    #[test]
    fn all_empty_resolves_to_empty_string() {
        let text = LocalizedText::bilingual("", "");
        assert_eq!(resolve(Some(&text), &lang("de")), "");
        assert_eq!(resolve(Some(&text), &lang("ar")), "");
    }

    #[test]
    fn missing_value_resolves_to_empty_string() {
        assert_eq!(resolve(None, &lang("de")), "");
    }

    #[test]
    fn plain_strings_pass_through_untouched() {
        let text = LocalizedText::Plain("Goslar".to_string());
        assert_eq!(resolve(Some(&text), &lang("ar")), "Goslar");
        assert_eq!(resolve(Some(&text), &lang("de")), "Goslar");
    }

    #[test]
    fn matches_the_fallback_rule_for_every_combination() {
        let samples = ["", "a", "b"];
        for ar in samples {
            for de in samples {
                let text = BilingualText::new(ar, de);
                for locale in Locale::ALL {
                    let requested = text.get(locale);
                    let expected = if requested.is_empty() { ar } else { requested };
                    assert_eq!(text.resolve(&locale.into()), expected);
                }
            }
        }
    }
}
