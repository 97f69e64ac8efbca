//! Display locale for user-facing messages and price formatting.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Locale`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    /// The input string is empty.
    #[error("locale cannot be empty")]
    Empty,
    /// The input names a locale that has no message catalog.
    #[error("unsupported locale '{0}' (supported: pt-BR, en)")]
    Unsupported(String),
}

/// A supported display locale.
///
/// The shop is Brazilian, so Portuguese is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    /// Brazilian Portuguese (`pt-BR`).
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    /// English (`en`).
    #[serde(rename = "en")]
    En,
}

impl Locale {
    /// Parse a locale tag such as `pt-BR`, `pt_BR`, `pt`, `en` or `en-US`.
    ///
    /// Matching is case-insensitive and only the primary language subtag
    /// decides the locale.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is empty or names an unsupported language.
    pub fn parse(s: &str) -> Result<Self, LocaleError> {
        let tag = s.trim();
        if tag.is_empty() {
            return Err(LocaleError::Empty);
        }

        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or(tag)
            .to_ascii_lowercase();

        match language.as_str() {
            "pt" => Ok(Self::PtBr),
            "en" => Ok(Self::En),
            _ => Err(LocaleError::Unsupported(tag.to_string())),
        }
    }

    /// Returns the BCP 47 tag for this locale.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::PtBr => "pt-BR",
            Self::En => "en",
        }
    }

    /// Separator placed between groups of three integer digits.
    #[must_use]
    pub const fn group_separator(self) -> char {
        match self {
            Self::PtBr => '.',
            Self::En => ',',
        }
    }

    /// Separator placed before the fractional digits.
    #[must_use]
    pub const fn decimal_separator(self) -> char {
        match self {
            Self::PtBr => ',',
            Self::En => '.',
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_portuguese_variants() {
        assert_eq!(Locale::parse("pt-BR").unwrap(), Locale::PtBr);
        assert_eq!(Locale::parse("pt_BR").unwrap(), Locale::PtBr);
        assert_eq!(Locale::parse("PT").unwrap(), Locale::PtBr);
    }

    #[test]
    fn test_parse_english_variants() {
        assert_eq!(Locale::parse("en").unwrap(), Locale::En);
        assert_eq!(Locale::parse("en-US").unwrap(), Locale::En);
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Locale::parse("  "), Err(LocaleError::Empty)));
    }

    #[test]
    fn test_parse_unsupported() {
        assert!(matches!(
            Locale::parse("fr-FR"),
            Err(LocaleError::Unsupported(_))
        ));
    }

    #[test]
    fn test_default_is_portuguese() {
        assert_eq!(Locale::default(), Locale::PtBr);
    }

    #[test]
    fn test_display_roundtrip() {
        for locale in [Locale::PtBr, Locale::En] {
            assert_eq!(locale.to_string().parse::<Locale>().unwrap(), locale);
        }
    }

    #[test]
    fn test_serde_uses_tags() {
        assert_eq!(serde_json::to_string(&Locale::PtBr).unwrap(), "\"pt-BR\"");
        let parsed: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Locale::En);
    }
}
