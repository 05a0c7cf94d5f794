//! Message template registry
//!
//! This module provides [`TemplateRegistry`], a thread-safe registry for managing
//! and accessing message templates.

use crate::{Language, MessageTemplate, PromptError, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A thread-safe registry for managing message templates
///
/// # Examples
///
/// ```
/// use cryptobot_prompt::{JinjaTemplate, Language, TemplateRegistry};
/// use serde_json::json;
///
/// let registry = TemplateRegistry::new();
/// registry.register(JinjaTemplate::bilingual(
///     "greeting",
///     "Hola, {{ name }}!",
///     "Hello, {{ name }}!",
/// ).unwrap());
///
/// let es = registry.render("greeting", &json!({ "name": "Ada" })).unwrap();
/// assert_eq!(es, "Hola, Ada!");
///
/// let en = registry
///     .render_with_lang("greeting", &Language::English, &json!({ "name": "Ada" }))
///     .unwrap();
/// assert_eq!(en, "Hello, Ada!");
/// ```
pub struct TemplateRegistry {
    templates: RwLock<HashMap<String, Arc<dyn MessageTemplate>>>,
    default_language: Language,
}

impl TemplateRegistry {
    /// Create a new empty registry with Spanish as default language
    pub fn new() -> Self {
        Self::with_language(Language::Spanish)
    }

    /// Create a registry with a specific default language
    pub fn with_language(lang: Language) -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
            default_language: lang,
        }
    }

    /// Get the default language
    pub fn default_language(&self) -> &Language {
        &self.default_language
    }

    /// Register a template
    ///
    /// If a template with the same name already exists, it will be replaced.
    pub fn register<T: MessageTemplate + 'static>(&self, template: T) {
        if let Ok(mut templates) = self.templates.write() {
            templates.insert(template.name().to_string(), Arc::new(template));
        }
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn MessageTemplate>> {
        self.templates.read().ok()?.get(name).cloned()
    }

    /// Check if a template is registered
    pub fn contains(&self, name: &str) -> bool {
        self.templates
            .read()
            .map(|t| t.contains_key(name))
            .unwrap_or(false)
    }

    /// Check that every name in `names` is registered
    ///
    /// Returns the first missing name as an error. Meant to run once at
    /// startup so that a missing template never surfaces per request.
    pub fn ensure_registered<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<()> {
        for name in names {
            if !self.contains(name) {
                return Err(PromptError::TemplateNotRegistered(name.to_string()));
            }
        }
        Ok(())
    }

    /// Render a template with the default language
    pub fn render(&self, name: &str, vars: &serde_json::Value) -> Result<String> {
        self.render_with_lang(name, &self.default_language, vars)
    }

    /// Render a template with a specific language
    pub fn render_with_lang(
        &self,
        name: &str,
        lang: &Language,
        vars: &serde_json::Value,
    ) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| PromptError::TemplateNotRegistered(name.to_string()))?;

        template.render_with_fallback(lang, vars)
    }

    /// List all registered template names, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .templates
            .read()
            .map(|t| t.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Get the number of registered templates
    pub fn len(&self) -> usize {
        self.templates.read().map(|t| t.len()).unwrap_or(0)
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("default_language", &self.default_language)
            .field("templates", &self.list())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JinjaTemplate;
    use serde_json::json;

    #[test]
    fn test_new_registry() {
        let registry = TemplateRegistry::new();
        assert_eq!(registry.default_language(), &Language::Spanish);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_and_get() {
        let registry = TemplateRegistry::new();
        registry.register(JinjaTemplate::new("test", "Hola").unwrap());

        assert!(registry.contains("test"));
        assert!(registry.get("test").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_render_with_lang_falls_back() {
        let registry = TemplateRegistry::new();
        registry.register(JinjaTemplate::new("greeting", "Hola, {{ name }}!").unwrap());

        let result = registry
            .render_with_lang("greeting", &Language::English, &json!({ "name": "Ada" }))
            .unwrap();
        assert_eq!(result, "Hola, Ada!");
    }

    #[test]
    fn test_render_not_registered() {
        let registry = TemplateRegistry::new();
        let result = registry.render("nonexistent", &json!({}));
        assert!(matches!(result, Err(PromptError::TemplateNotRegistered(name)) if name == "nonexistent"));
    }

    #[test]
    fn test_ensure_registered() {
        let registry = TemplateRegistry::new();
        registry.register(JinjaTemplate::new("a", "A").unwrap());

        assert!(registry.ensure_registered(["a"]).is_ok());

        let err = registry.ensure_registered(["a", "b"]).unwrap_err();
        assert_eq!(err.to_string(), "Template 'b' not registered");
    }

    #[test]
    fn test_list_sorted() {
        let registry = TemplateRegistry::new();
        registry.register(JinjaTemplate::new("b", "B").unwrap());
        registry.register(JinjaTemplate::new("a", "A").unwrap());

        assert_eq!(registry.list(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_replace_template() {
        let registry = TemplateRegistry::new();
        registry.register(JinjaTemplate::new("test", "Version 1").unwrap());
        registry.register(JinjaTemplate::new("test", "Version 2").unwrap());

        let result = registry.render("test", &json!({})).unwrap();
        assert_eq!(result, "Version 2");
    }

    #[test]
    fn test_debug() {
        let registry = TemplateRegistry::new();
        registry.register(JinjaTemplate::new("test", "Hola").unwrap());

        let debug = format!("{registry:?}");
        assert!(debug.contains("TemplateRegistry"));
        assert!(debug.contains("Spanish"));
    }
}
