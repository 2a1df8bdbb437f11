//! Language registry: the ordered set of languages a run checks.
//!
//! The registry is a plain value. The sequencer receives it at construction,
//! so tests can substitute a small registry without touching global state.

use anyhow::{bail, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Code of the language every pair check is anchored on.
pub const BASE_LANGUAGE: &str = "en";

/// Display name used when a code is missing from the name table.
pub const UNKNOWN_LANGUAGE_NAME: &str = "Unknown Language";

/// BCP 47 root codes probed by default, in display order.
pub const BUILTIN_CODES: &[&str] = &[
    "af", "am", "ar", "az", "be", "bg", "bn", "bs", "ca", "cs", "cy", "da", "de", "el", "en",
    "es", "et", "fa", "fi", "fil", "fr", "ga", "gl", "gu", "he", "hi", "hr", "hu", "id", "is",
    "it", "ja", "jv", "km", "kn", "ko", "lo", "lt", "lv", "ml", "mr", "ms", "nb", "ne", "nl",
    "no", "pa", "pl", "pt", "ro", "ru", "si", "sk", "sl", "sq", "sr", "sv", "sw", "ta", "te",
    "th", "tr", "uk", "ur", "vi", "zh", "zu",
];

/// English display names for the built-in codes.
pub const LANGUAGE_NAMES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("az", "Azerbaijani"),
    ("be", "Belarusian"),
    ("bg", "Bulgarian"),
    ("bn", "Bengali"),
    ("bs", "Bosnian"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("cy", "Welsh"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fil", "Filipino"),
    ("fr", "French"),
    ("ga", "Irish"),
    ("gl", "Galician"),
    ("gu", "Gujarati"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("id", "Indonesian"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("jv", "Javanese"),
    ("km", "Khmer"),
    ("kn", "Kannada"),
    ("ko", "Korean"),
    ("lo", "Lao"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("ml", "Malayalam"),
    ("mr", "Marathi"),
    ("ms", "Malay"),
    ("nb", "Norwegian Bokmål"),
    ("ne", "Nepali"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("pa", "Punjabi"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese"),
    ("zu", "Zulu"),
];

/// A language to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageEntry {
    /// BCP 47 code (e.g., "fr", "fil")
    pub code: String,

    /// English display name (e.g., "French")
    pub name: String,
}

impl LanguageEntry {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Whether this entry is the base language all pairs are anchored on.
    pub fn is_base_language(&self) -> bool {
        self.code == BASE_LANGUAGE
    }
}

/// Ordered, immutable collection of languages.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    languages: Vec<LanguageEntry>,
}

fn code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-z]{2,3}(-[A-Za-z0-9]{2,8})*$").expect("language code pattern is valid")
    })
}

/// Look up the display name for a code in a name table.
///
/// Falls back to [`UNKNOWN_LANGUAGE_NAME`] when the code is not listed.
pub fn display_name<'a>(code: &str, names: &[(&str, &'a str)]) -> &'a str {
    names
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_LANGUAGE_NAME)
}

impl LanguageRegistry {
    /// Build a registry from explicit entries.
    ///
    /// # Returns
    /// * `Err` if any code is not shaped like a BCP 47 tag
    pub fn new(languages: Vec<LanguageEntry>) -> Result<Self> {
        for entry in &languages {
            if !code_pattern().is_match(&entry.code) {
                bail!("Invalid language code: '{}'", entry.code);
            }
        }
        Ok(Self { languages })
    }

    /// Build a registry from a list of codes, naming each from `names`.
    pub fn from_codes(codes: &[&str], names: &[(&str, &str)]) -> Result<Self> {
        let languages = codes
            .iter()
            .map(|code| LanguageEntry::new(*code, display_name(code, names)))
            .collect();
        Self::new(languages)
    }

    /// The default registry every run uses.
    pub fn builtin() -> Self {
        let languages = BUILTIN_CODES
            .iter()
            .map(|code| LanguageEntry::new(*code, display_name(code, LANGUAGE_NAMES)))
            .collect();
        Self { languages }
    }

    /// Get a language entry by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageEntry> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageEntry> {
        self.languages.iter()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Number of pair checks a full run performs (three per language).
    pub fn total_checks(&self) -> usize {
        self.languages.len() * 3
    }
}
