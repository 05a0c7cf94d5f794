//! Language support for message templates
//!
//! The bot speaks Spanish by default. Other languages are selected from the
//! language code the messaging platform reports for a user.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported languages for messages
///
/// # Examples
///
/// ```
/// use cryptobot_prompt::Language;
///
/// let lang = Language::Spanish;
/// assert_eq!(lang.code(), "es");
/// assert_eq!(lang.name(), "Español");
///
/// // Platform codes carry a region suffix
/// assert_eq!(Language::from_code("en-US"), Language::English);
///
/// // Custom language
/// let custom = Language::Other("pt".to_string());
/// assert_eq!(custom.code(), "pt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    /// Spanish
    #[default]
    Spanish,
    /// English
    English,
    /// Other languages (ISO 639-1 code)
    Other(String),
}

impl Language {
    /// Get ISO 639-1 language code
    pub fn code(&self) -> &str {
        match self {
            Language::Spanish => "es",
            Language::English => "en",
            Language::Other(code) => code,
        }
    }

    /// Get language name for display
    pub fn name(&self) -> &str {
        match self {
            Language::Spanish => "Español",
            Language::English => "English",
            Language::Other(code) => code,
        }
    }

    /// Parse from an IETF tag, ISO 639-1 code or common name
    ///
    /// Region subtags (`es-CL`, `en_US`) are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use cryptobot_prompt::Language;
    ///
    /// assert_eq!(Language::from_code("es"), Language::Spanish);
    /// assert_eq!(Language::from_code("es-419"), Language::Spanish);
    /// assert_eq!(Language::from_code("español"), Language::Spanish);
    /// assert_eq!(Language::from_code("EN"), Language::English);
    /// assert_eq!(Language::from_code("pt-BR"), Language::Other("pt".to_string()));
    /// ```
    pub fn from_code(s: &str) -> Self {
        let lowered = s.trim().to_lowercase();
        let primary = lowered
            .split(['-', '_'])
            .next()
            .unwrap_or_default();

        match primary {
            "es" | "spanish" | "español" | "espanol" => Language::Spanish,
            "en" | "english" => Language::English,
            other => Language::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<&str> for Language {
    fn from(s: &str) -> Self {
        Language::from_code(s)
    }
}

impl From<String> for Language {
    fn from(s: String) -> Self {
        Language::from_code(&s)
    }
}
