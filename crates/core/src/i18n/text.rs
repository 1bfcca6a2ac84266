use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A locale that content is authored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ar,
    De,
}

impl Locale {
    /// Every supported locale, in authoring order.
    pub const ALL: [Locale; 2] = [Locale::Ar, Locale::De];

    /// Locale used when the requested one has no content. Always Arabic,
    /// independent of the site's display default.
    pub const FALLBACK: Locale = Locale::Ar;

    pub fn code(self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::De => "de",
        }
    }

    /// Exact two-letter code match.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ar" => Some(Locale::Ar),
            "de" => Some(Locale::De),
            _ => None,
        }
    }

    /// Match a BCP 47-ish tag (`de-DE`, `ar_EG`, `DE`) on its primary subtag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next()?.trim().to_ascii_lowercase();
        Self::from_code(&primary)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A negotiated language code. Not necessarily a supported [`Locale`]:
/// `en` is a valid `LangCode` and simply resolves through the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LangCode(String);

impl LangCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The supported locale this code names, if any.
    pub fn locale(&self) -> Option<Locale> {
        Locale::from_code(&self.0)
    }
}

impl Default for LangCode {
    fn default() -> Self {
        Locale::FALLBACK.into()
    }
}

impl From<Locale> for LangCode {
    fn from(locale: Locale) -> Self {
        Self(locale.code().to_string())
    }
}

impl fmt::Display for LangCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parallel Arabic and German strings for one piece of content.
///
/// Both keys are always present once deserialized: a missing key or a JSON
/// `null` becomes the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualText {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ar: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub de: String,
}

impl BilingualText {
    pub fn new(ar: impl Into<String>, de: impl Into<String>) -> Self {
        Self {
            ar: ar.into(),
            de: de.into(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar => &self.ar,
            Locale::De => &self.de,
        }
    }

    pub fn set(&mut self, locale: Locale, value: impl Into<String>) {
        let slot = match locale {
            Locale::Ar => &mut self.ar,
            Locale::De => &mut self.de,
        };
        *slot = value.into();
    }

    /// Locales whose string is empty.
    pub fn missing_locales(&self) -> Vec<Locale> {
        Locale::ALL
            .into_iter()
            .filter(|locale| self.get(*locale).is_empty())
            .collect()
    }
}

/// A stored text field. Normally bilingual; legacy documents may still carry
/// a single plain string, which is served as-is in every language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Bilingual(BilingualText),
    Plain(String),
}

impl LocalizedText {
    pub fn bilingual(ar: impl Into<String>, de: impl Into<String>) -> Self {
        LocalizedText::Bilingual(BilingualText::new(ar, de))
    }

    /// The bilingual form, if this is not a legacy plain string.
    pub fn as_bilingual(&self) -> Option<&BilingualText> {
        match self {
            LocalizedText::Bilingual(text) => Some(text),
            LocalizedText::Plain(_) => None,
        }
    }

    /// Edit one locale. A legacy plain string is first promoted to a
    /// bilingual value carrying the string in both locales.
    pub fn set(&mut self, locale: Locale, value: impl Into<String>) {
        if let LocalizedText::Plain(plain) = self {
            *self = LocalizedText::Bilingual(BilingualText::new(plain.clone(), plain.clone()));
        }
        if let LocalizedText::Bilingual(text) = self {
            text.set(locale, value);
        }
    }
}

impl Default for LocalizedText {
    fn default() -> Self {
        LocalizedText::Bilingual(BilingualText::default())
    }
}

impl From<BilingualText> for LocalizedText {
    fn from(text: BilingualText) -> Self {
        LocalizedText::Bilingual(text)
    }
}

/// Deserialize `T`, treating JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_and_null_keys_coalesce_to_empty() {
        let text: BilingualText = serde_json::from_value(json!({ "ar": null })).unwrap();
        assert_eq!(text, BilingualText::new("", ""));
    }

    #[test]
    fn localized_text_accepts_legacy_plain_strings() {
        let plain: LocalizedText = serde_json::from_value(json!("Goslar")).unwrap();
        assert_eq!(plain, LocalizedText::Plain("Goslar".to_string()));

        let both: LocalizedText =
            serde_json::from_value(json!({ "ar": "غوسلار", "de": "Goslar" })).unwrap();
        assert_eq!(both, LocalizedText::bilingual("غوسلار", "Goslar"));
        assert_eq!(
            serde_json::to_value(&both).unwrap(),
            json!({ "ar": "غوسلار", "de": "Goslar" })
        );
    }

    #[test]
    fn setting_a_locale_on_plain_text_promotes_it() {
        let mut text = LocalizedText::Plain("Hannover".to_string());
        text.set(Locale::Ar, "هانوفر");
        assert_eq!(text, LocalizedText::bilingual("هانوفر", "Hannover"));
    }

    #[test]
    fn locale_tags_match_on_primary_subtag() {
        assert_eq!(Locale::from_tag("de-DE"), Some(Locale::De));
        assert_eq!(Locale::from_tag("AR_eg"), Some(Locale::Ar));
        assert_eq!(Locale::from_tag("en-US"), None);
        assert_eq!(Locale::from_code("DE"), None);
    }

    #[test]
    fn missing_locales_lists_empty_entries() {
        assert_eq!(
            BilingualText::new("", "Tag 1").missing_locales(),
            vec![Locale::Ar]
        );
        assert!(BilingualText::new("a", "b").missing_locales().is_empty());
    }
}
