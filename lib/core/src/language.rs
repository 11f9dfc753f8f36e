//! Display language of the chat session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language used for locale text and sent to the server with each message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// Korean (`ko`), the dashboard default.
    #[default]
    #[serde(rename = "ko")]
    Korean,
    /// English (`en`).
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Returns the wire code for this language.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Korean => "ko",
            Self::English => "en",
        }
    }

    /// Parses a language code, falling back to the default for unknown codes.
    #[must_use]
    pub fn from_code_or_default(code: &str) -> Self {
        code.parse().unwrap_or_default()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned for an unsupported language code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage {
    /// The code that was rejected.
    pub code: String,
}

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported language code: {}", self.code)
    }
}

impl std::error::Error for UnknownLanguage {}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" | "kr" | "korean" => Ok(Self::Korean),
            "en" | "english" => Ok(Self::English),
            other => Err(UnknownLanguage {
                code: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_korean() {
        assert_eq!(Language::default(), Language::Korean);
    }

    #[test]
    fn parse_codes() {
        assert_eq!("en".parse::<Language>().expect("en"), Language::English);
        assert_eq!("KO".parse::<Language>().expect("ko"), Language::Korean);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn unknown_code_falls_back() {
        assert_eq!(Language::from_code_or_default("de"), Language::Korean);
    }

    #[test]
    fn serializes_as_wire_code() {
        let json = serde_json::to_string(&Language::English).expect("serialize");
        assert_eq!(json, "\"en\"");
        let parsed: Language = serde_json::from_str("\"ko\"").expect("deserialize");
        assert_eq!(parsed, Language::Korean);
    }
}
