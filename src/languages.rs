//! Supported OCR languages
//!
//! The fixed set of language/script codes the EasyOCR backend understands,
//! plus validated language selections built from user input.

use std::fmt;
use thiserror::Error;

/// Every language code the engine accepts, in display order
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "abq", "ady", "af", "ang", "ar", "as", "ava", "az", "be", "bg", "bh", "bho", "bn", "bs",
    "ch_sim", "ch_tra", "che", "cs", "cy", "da", "dar", "de", "en", "es", "et", "fa", "fr", "ga",
    "gom", "hi", "hr", "hu", "id", "inh", "is", "it", "ja", "kbd", "kn", "ko", "ku", "la", "lbe",
    "lez", "lt", "lv", "mah", "mai", "mi", "mn", "mr", "ms", "mt", "ne", "new", "nl", "no", "oc",
    "pi", "pl", "pt", "ro", "ru", "rs_cyrillic", "rs_latin", "sck", "sk", "sl", "sq", "sv", "sw",
    "ta", "tab", "te", "th", "tjk", "tl", "tr", "ug", "uk", "ur", "uz", "vi",
];

/// Language selected when the user has not picked anything yet
pub const DEFAULT_LANGUAGE: &str = "en";

/// Language validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    #[error("unsupported language code: {0:?}")]
    Unsupported(String),
    #[error("at least one language must be selected")]
    Empty,
}

/// A language code from [`SUPPORTED_LANGUAGES`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageCode(&'static str);

impl LanguageCode {
    /// Look up a code in the supported set
    pub fn parse(code: &str) -> Result<Self, LanguageError> {
        let code = code.trim();
        SUPPORTED_LANGUAGES
            .iter()
            .find(|&&known| known == code)
            .map(|&known| LanguageCode(known))
            .ok_or_else(|| LanguageError::Unsupported(code.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// All supported codes
    pub fn all() -> impl Iterator<Item = LanguageCode> {
        SUPPORTED_LANGUAGES.iter().map(|&code| LanguageCode(code))
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Non-empty, duplicate-free, ordered selection of languages
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageSet(Vec<LanguageCode>);

impl LanguageSet {
    /// Validate a list of user-supplied codes.
    ///
    /// The first unsupported code aborts parsing. Duplicates keep their first
    /// position.
    pub fn parse<I, S>(codes: I) -> Result<Self, LanguageError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed: Vec<LanguageCode> = Vec::new();
        for code in codes {
            let code = LanguageCode::parse(code.as_ref())?;
            if !parsed.contains(&code) {
                parsed.push(code);
            }
        }

        if parsed.is_empty() {
            return Err(LanguageError::Empty);
        }
        Ok(Self(parsed))
    }

    /// Default selection (`en`)
    pub fn default_selection() -> Self {
        Self(vec![LanguageCode(DEFAULT_LANGUAGE)])
    }

    pub fn codes(&self) -> &[LanguageCode] {
        &self.0
    }

    /// Comma-separated codes, as passed to the engine bridge
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(LanguageCode::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for LanguageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_no_duplicates() {
        let mut codes: Vec<&str> = SUPPORTED_LANGUAGES.to_vec();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), SUPPORTED_LANGUAGES.len());
        assert_eq!(SUPPORTED_LANGUAGES.len(), 83);
    }

    #[test]
    fn test_parse_known_codes() {
        assert_eq!(LanguageCode::parse("en").unwrap().as_str(), "en");
        assert_eq!(LanguageCode::parse(" ch_sim ").unwrap().as_str(), "ch_sim");
        assert!(LanguageCode::parse(DEFAULT_LANGUAGE).is_ok());
    }

    #[test]
    fn test_parse_unknown_code() {
        assert_eq!(
            LanguageCode::parse("klingon"),
            Err(LanguageError::Unsupported("klingon".to_string()))
        );
        // Case matters: the engine only knows lowercase codes
        assert!(LanguageCode::parse("EN").is_err());
    }

    #[test]
    fn test_set_keeps_order_and_drops_duplicates() {
        let set = LanguageSet::parse(["fr", "en", "fr"]).unwrap();
        assert_eq!(set.codes().len(), 2);
        assert_eq!(set.joined(), "fr,en");
        assert!(set.codes().contains(&LanguageCode::parse("en").unwrap()));
    }

    #[test]
    fn test_set_rejects_empty_and_unsupported() {
        let empty: [&str; 0] = [];
        assert_eq!(LanguageSet::parse(empty), Err(LanguageError::Empty));
        assert_eq!(
            LanguageSet::parse(["en", "xx"]),
            Err(LanguageError::Unsupported("xx".to_string()))
        );
    }

    #[test]
    fn test_default_selection() {
        assert_eq!(LanguageSet::default_selection().joined(), "en");
    }
}
