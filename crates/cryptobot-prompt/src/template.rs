//! Core message template trait
//!
//! This module defines the [`MessageTemplate`] trait that all template implementations must follow.

use crate::{Language, PromptError, Result};

/// Core trait for message templates
///
/// Templates can be rendered with variables and fall back to the default
/// language (Spanish) when the requested language is not available.
///
/// This trait is dyn-compatible, using `serde_json::Value` for variables instead of generics.
pub trait MessageTemplate: Send + Sync {
    /// Get the template name/identifier
    fn name(&self) -> &str;

    /// Get available languages
    fn languages(&self) -> Vec<Language>;

    /// Check if a language is supported
    fn supports_language(&self, lang: &Language) -> bool {
        self.languages().contains(lang)
    }

    /// Render the template with variables for a specific language
    fn render(&self, lang: &Language, vars: &serde_json::Value) -> Result<String>;

    /// Render with fallback to default language
    ///
    /// If the requested language is not available:
    /// 1. Try Spanish as fallback
    /// 2. If Spanish not available, use the first available language
    /// 3. If no languages available, return error
    fn render_with_fallback(&self, lang: &Language, vars: &serde_json::Value) -> Result<String> {
        if self.supports_language(lang) {
            return self.render(lang, vars);
        }

        if self.supports_language(&Language::Spanish) {
            return self.render(&Language::Spanish, vars);
        }

        let mut languages = self.languages();
        languages.sort_by(|a, b| a.code().cmp(b.code()));
        let fallback = languages
            .into_iter()
            .next()
            .ok_or_else(|| PromptError::NoLanguageAvailable(self.name().to_string()))?;

        self.render(&fallback, vars)
    }

    /// Get the normalized template source for a language
    fn raw_template(&self, lang: &Language) -> Option<&str>;
}
