//! Message template management for cryptobot
//!
//! This crate renders the bot's replies from named templates with
//! multi-language support, variable interpolation, and loops over ordered
//! context sequences.
//!
//! # Features
//!
//! - **Multi-language support**: Templates can have variants for different languages
//! - **Variable interpolation**: Jinja2 syntax (`{{ variable }}`) for dynamic content
//! - **Template registry**: Centralized, thread-safe lookup by name
//! - **Whitespace normalization**: Sources are dedented, output is trimmed
//!
//! # Quick Start
//!
//! ```
//! use cryptobot_prompt::{JinjaTemplate, Language, MessageTemplate};
//! use serde_json::json;
//!
//! let template = JinjaTemplate::bilingual(
//!     "greeting",
//!     "Hola, {{ name }}!",
//!     "Hello, {{ name }}!",
//! ).unwrap();
//!
//! let es = template.render(&Language::Spanish, &json!({ "name": "Mundo" })).unwrap();
//! assert_eq!(es, "Hola, Mundo!");
//! ```

mod dedent;
mod error;
mod jinja;
mod language;
mod registry;
mod template;

pub use dedent::dedent;
pub use error::{PromptError, Result};
pub use jinja::{JinjaTemplate, JinjaTemplateBuilder, escape_markdown};
pub use language::Language;
pub use registry::TemplateRegistry;
pub use template::MessageTemplate;
