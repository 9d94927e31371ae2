use std::fmt;

use serde::{Deserialize, Serialize};

/// Display languages supported by the platform.
///
/// The backend accepts a two-letter code on every localizable endpoint and
/// silently falls back to English for anything it does not recognize;
/// [`Language::parse`] mirrors that behavior so client and backend agree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
    Rw,
}

impl Language {
    /// Wire code sent as the `language` field or query parameter.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
            Language::Rw => "rw",
        }
    }

    /// Lenient parse: trim, lowercase, keep the first two characters,
    /// fall back to English for anything unrecognized.
    pub fn parse(s: &str) -> Language {
        let lower = s.trim().to_lowercase();
        let code: String = lower.chars().take(2).collect();
        match code.as_str() {
            "fr" => Language::Fr,
            "rw" => Language::Rw,
            _ => Language::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_exact_codes() {
        assert_eq!(Language::parse("en"), Language::En);
        assert_eq!(Language::parse("fr"), Language::Fr);
        assert_eq!(Language::parse("rw"), Language::Rw);
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(Language::parse("  FR "), Language::Fr);
        assert_eq!(Language::parse("EN-us"), Language::En);
        assert_eq!(Language::parse("rw-RW"), Language::Rw);
    }

    #[test]
    fn parse_falls_back_to_english() {
        assert_eq!(Language::parse("de"), Language::En);
        assert_eq!(Language::parse(""), Language::En);
        assert_eq!(Language::parse("swahili"), Language::En);
    }

    #[test]
    fn serde_uses_lowercase_codes() {
        assert_eq!(serde_json::to_string(&Language::Rw).unwrap(), "\"rw\"");
        let parsed: Language = serde_json::from_str("\"fr\"").unwrap();
        assert_eq!(parsed, Language::Fr);
    }
}
