//! Normalized locale tags.
//!
//! Catalog locales come from several places: file names (`harbour-foilauth-pl.ts`),
//! the `language` attribute inside a catalog (`pl_PL`), and POSIX environment
//! values (`pl_PL.UTF-8`). All of them are normalized into one canonical
//! BCP 47 form so that equality is plain string equality.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::error::Error;

/// A canonical locale tag such as `en`, `pl` or `pt-BR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    tag: String,
    language_len: usize,
}

impl Locale {
    /// Parses and normalizes a locale tag.
    ///
    /// Underscores are accepted as separators and POSIX suffixes
    /// (`.UTF-8`, `@euro`) are ignored.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let trimmed = input
            .trim()
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .replace('_', "-");
        let langid: LanguageIdentifier = trimmed
            .parse()
            .map_err(|_| Error::InvalidLocale(input.to_string()))?;
        if langid.language.is_empty() {
            return Err(Error::InvalidLocale(input.to_string()));
        }
        Ok(Self::from_langid(&langid))
    }

    fn from_langid(langid: &LanguageIdentifier) -> Self {
        Self {
            tag: langid.to_string(),
            language_len: langid.language.as_str().len(),
        }
    }

    /// The full canonical tag.
    pub fn as_str(&self) -> &str {
        &self.tag
    }

    /// The primary language subtag (`pl` for `pl-PL`).
    pub fn language(&self) -> &str {
        &self.tag[..self.language_len]
    }

    /// Whether the tag carries more than a language subtag.
    pub fn is_language_only(&self) -> bool {
        self.tag.len() == self.language_len
    }

    /// The bare language locale, if this tag has script/region/variant subtags.
    pub fn language_only(&self) -> Option<Locale> {
        if self.is_language_only() {
            return None;
        }
        Some(Locale {
            tag: self.language().to_string(),
            language_len: self.language_len,
        })
    }

    /// Whether both locales share a primary language.
    pub fn same_language(&self, other: &Locale) -> bool {
        self.language() == other.language()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Locale::parse(&value)
    }
}

impl TryFrom<&str> for Locale {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Locale::parse(value)
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.tag
    }
}

impl From<&LanguageIdentifier> for Locale {
    fn from(value: &LanguageIdentifier) -> Self {
        Locale::from_langid(value)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_language() {
        let locale = Locale::parse("pl").unwrap();
        assert_eq!(locale.as_str(), "pl");
        assert_eq!(locale.language(), "pl");
        assert!(locale.is_language_only());
        assert!(locale.language_only().is_none());
    }

    #[test]
    fn test_parse_normalizes_case_and_separator() {
        let locale = Locale::parse("PL_pl").unwrap();
        assert_eq!(locale.as_str(), "pl-PL");
        assert_eq!(locale.language(), "pl");
        assert_eq!(locale, Locale::parse("pl-PL").unwrap());
    }

    #[test]
    fn test_parse_posix_suffixes() {
        assert_eq!(Locale::parse("sv_SE.UTF-8").unwrap().as_str(), "sv-SE");
        assert_eq!(Locale::parse("ru_RU.UTF-8@latin").unwrap().as_str(), "ru-RU");
    }

    #[test]
    fn test_language_only() {
        let locale = Locale::parse("pt-BR").unwrap();
        let base = locale.language_only().unwrap();
        assert_eq!(base.as_str(), "pt");
        assert!(base.is_language_only());
        assert!(locale.same_language(&base));
    }

    #[test]
    fn test_invalid_locales() {
        assert!(Locale::parse("").is_err());
        assert!(Locale::parse("C").is_err());
        assert!(Locale::parse("not a locale").is_err());
        assert!(Locale::parse("und").is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let locale: Locale = serde_json::from_str("\"ru_RU\"").unwrap();
        assert_eq!(locale.as_str(), "ru-RU");
        assert_eq!(serde_json::to_string(&locale).unwrap(), "\"ru-RU\"");
        assert!(serde_json::from_str::<Locale>("\"C\"").is_err());
    }
}
