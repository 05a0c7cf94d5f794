//! Reply templates of the bot
//!
//! Templates are addressed by [`TemplateName`] rather than free-form strings,
//! and every name is checked against the registry once at startup.
//! - `messages`: template sources
//! - `context`: typed render contexts

mod context;
mod messages;

pub use context::{
    AboutInfoContext, DonationsContext, ExchangeRow, MarketStatusContext, StartContext,
};

use cryptobot_prompt::{Language, Result, TemplateRegistry};
use std::fmt;

/// Every template the bot renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
    Start,
    AboutInfo,
    AboutDonations,
    MarketStatus,
}

impl TemplateName {
    pub const ALL: [TemplateName; 4] = [
        TemplateName::Start,
        TemplateName::AboutInfo,
        TemplateName::AboutDonations,
        TemplateName::MarketStatus,
    ];

    /// Registry key
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateName::Start => "start",
            TemplateName::AboutInfo => "about.info",
            TemplateName::AboutDonations => "about.donations",
            TemplateName::MarketStatus => "market.status",
        }
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Register all reply templates with the given registry
pub fn register_templates(registry: &TemplateRegistry) -> Result<()> {
    registry.register(messages::start()?);
    registry.register(messages::about_info()?);
    registry.register(messages::about_donations()?);
    registry.register(messages::market_status()?);
    Ok(())
}

/// A Spanish-default registry holding every reply template
pub fn default_registry() -> Result<TemplateRegistry> {
    let registry = TemplateRegistry::with_language(Language::Spanish);
    register_templates(&registry)?;
    registry.ensure_registered(TemplateName::ALL.iter().map(|name| name.as_str()))?;
    Ok(registry)
}

/// Label of the button that re-runs a quote command
pub fn refresh_label(lang: &Language) -> &'static str {
    match lang {
        Language::English => "🔄 Refresh",
        _ => "🔄 Actualizar",
    }
}
