//! Configuration for the bot process

use crate::error::{BotError, Result};
use chrono::FixedOffset;
use cryptobot_utils::{ProcessEnv, VarSource, mask_secret};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

const SECONDS_PER_HOUR: i32 = 3600;

/// Author details shown by `/about`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub name: String,
    pub email: Option<String>,
    pub url: Option<String>,
    pub telegram: Option<String>,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            name: "CryptoLatam".to_string(),
            email: None,
            url: Some("https://github.com/cryptolatam".to_string()),
            telegram: None,
        }
    }
}

/// Static bot information rendered by the `about.info` template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotInfo {
    pub name: String,
    pub version: String,
    pub author: Author,
}

impl Default for BotInfo {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            author: Author::default(),
        }
    }
}

/// A single donation address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Donation {
    pub name: String,
    pub address: String,
}

/// Donation addresses, each optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Donations {
    pub btc: Option<String>,
    pub eth: Option<String>,
    pub paypal: Option<String>,
}

impl Donations {
    /// Configured addresses in display order
    pub fn list(&self) -> Vec<Donation> {
        [
            ("BTC", &self.btc),
            ("ETH", &self.eth),
            ("PayPal", &self.paypal),
        ]
        .into_iter()
        .filter_map(|(name, address)| {
            address.as_ref().map(|address| Donation {
                name: name.to_string(),
                address: address.clone(),
            })
        })
        .collect()
    }
}

/// Process configuration
#[derive(Clone)]
pub struct BotConfig {
    /// Bot token from BotFather
    pub telegram_token: String,

    /// Public base URL the webhook is registered under
    pub url: Url,

    /// Listen address
    pub host: String,
    pub port: u16,

    /// Directory for file-backed sessions; in-memory when unset
    pub session_dir: Option<PathBuf>,

    /// Per-request timeout applied by every exchange adapter
    pub quote_timeout: Duration,

    /// Offset used for the timestamp line of quote replies
    pub utc_offset_hours: i32,

    /// Command list override; the bundled list is used when unset
    pub commands_path: Option<PathBuf>,

    pub info: BotInfo,
    pub donations: Donations,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("telegram_token", &mask_secret(&self.telegram_token))
            .field("url", &self.url.as_str())
            .field("host", &self.host)
            .field("port", &self.port)
            .field("session_dir", &self.session_dir)
            .field("quote_timeout", &self.quote_timeout)
            .field("utc_offset_hours", &self.utc_offset_hours)
            .field("commands_path", &self.commands_path)
            .finish_non_exhaustive()
    }
}

impl BotConfig {
    /// Create a new configuration builder
    pub fn builder() -> BotConfigBuilder {
        BotConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_source(&ProcessEnv)
    }

    /// Load configuration from any variable source
    pub fn from_source(vars: &impl VarSource) -> Result<Self> {
        let url = vars.required("URL")?;
        let url = Url::parse(&url).map_err(|e| BotError::Config(format!("invalid URL: {e}")))?;

        let defaults = Author::default();
        let author = Author {
            name: vars.optional("AUTHOR_NAME").unwrap_or(defaults.name),
            email: vars.optional("AUTHOR_EMAIL").or(defaults.email),
            url: vars.optional("AUTHOR_URL").or(defaults.url),
            telegram: vars.optional("AUTHOR_TELEGRAM").or(defaults.telegram),
        };

        let mut builder = Self::builder()
            .telegram_token(vars.required("TELEGRAM_TOKEN")?)
            .url(url)
            .port(vars.parse_or("PORT", 3000)?)
            .quote_timeout(Duration::from_millis(vars.parse_or("QUOTE_TIMEOUT_MS", 5000)?))
            .utc_offset_hours(vars.parse_or("DISPLAY_UTC_OFFSET", -3)?)
            .author(author)
            .donations(Donations {
                btc: vars.optional("DONATIONS_BTC"),
                eth: vars.optional("DONATIONS_ETH"),
                paypal: vars.optional("DONATIONS_PAYPAL"),
            });

        if let Some(host) = vars.optional("HOST") {
            builder = builder.host(host);
        }
        if let Some(dir) = vars.optional("SESSION_DIR") {
            builder = builder.session_dir(dir);
        }
        if let Some(path) = vars.optional("COMMANDS_PATH") {
            builder = builder.commands_path(path);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.telegram_token.trim().is_empty() {
            return Err(BotError::Config("telegram token is empty".to_string()));
        }
        if self.quote_timeout.is_zero() {
            return Err(BotError::Config(
                "quote timeout must be greater than zero".to_string(),
            ));
        }
        if !matches!(self.url.scheme(), "http" | "https") {
            return Err(BotError::Config(format!(
                "URL must be http or https, got '{}'",
                self.url.scheme()
            )));
        }
        self.utc_offset()?;
        Ok(())
    }

    /// Display offset for timestamps
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_hours * SECONDS_PER_HOUR).ok_or_else(|| {
            BotError::Config(format!(
                "UTC offset out of range: {} hours",
                self.utc_offset_hours
            ))
        })
    }

    /// Full URL Telegram posts updates to
    pub fn webhook_url(&self) -> String {
        format!(
            "{}/webhook/{}",
            self.url.as_str().trim_end_matches('/'),
            self.telegram_token
        )
    }

    /// Socket address to listen on
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder for [`BotConfig`]
#[derive(Debug, Default)]
pub struct BotConfigBuilder {
    telegram_token: Option<String>,
    url: Option<Url>,
    host: Option<String>,
    port: Option<u16>,
    session_dir: Option<PathBuf>,
    quote_timeout: Option<Duration>,
    utc_offset_hours: Option<i32>,
    commands_path: Option<PathBuf>,
    author: Option<Author>,
    donations: Donations,
}

impl BotConfigBuilder {
    /// Set the bot token
    pub fn telegram_token(mut self, token: impl Into<String>) -> Self {
        self.telegram_token = Some(token.into());
        self
    }

    /// Set the public base URL
    pub fn url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    /// Set the listen host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the listen port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Persist sessions as files under `dir`
    pub fn session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session_dir = Some(dir.into());
        self
    }

    /// Set the exchange request timeout
    pub fn quote_timeout(mut self, timeout: Duration) -> Self {
        self.quote_timeout = Some(timeout);
        self
    }

    /// Set the display offset in hours
    pub fn utc_offset_hours(mut self, hours: i32) -> Self {
        self.utc_offset_hours = Some(hours);
        self
    }

    /// Read the command list from `path`
    pub fn commands_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.commands_path = Some(path.into());
        self
    }

    /// Set the author shown by `/about`
    pub fn author(mut self, author: Author) -> Self {
        self.author = Some(author);
        self
    }

    /// Set donation addresses
    pub fn donations(mut self, donations: Donations) -> Self {
        self.donations = donations;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<BotConfig> {
        let telegram_token = self
            .telegram_token
            .ok_or_else(|| BotError::Config("telegram token not set".to_string()))?;
        let url = self
            .url
            .ok_or_else(|| BotError::Config("public URL not set".to_string()))?;

        let config = BotConfig {
            telegram_token,
            url,
            host: self.host.unwrap_or_else(|| "0.0.0.0".to_string()),
            port: self.port.unwrap_or(3000),
            session_dir: self.session_dir,
            quote_timeout: self.quote_timeout.unwrap_or(Duration::from_secs(5)),
            utc_offset_hours: self.utc_offset_hours.unwrap_or(-3),
            commands_path: self.commands_path,
            info: BotInfo {
                author: self.author.unwrap_or_default(),
                ..BotInfo::default()
            },
            donations: self.donations,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_vars() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("TELEGRAM_TOKEN", "123456:ABCDEFGHIJ"),
            ("URL", "https://bot.example.com/"),
        ])
    }

    #[test]
    fn test_from_source_defaults() {
        let config = BotConfig::from_source(&base_vars()).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.quote_timeout, Duration::from_millis(5000));
        assert_eq!(config.utc_offset_hours, -3);
        assert!(config.session_dir.is_none());
        assert!(config.commands_path.is_none());
        assert!(config.donations.list().is_empty());
    }

    #[test]
    fn test_from_source_overrides() {
        let mut vars = base_vars();
        vars.insert("PORT", "8443");
        vars.insert("QUOTE_TIMEOUT_MS", "1500");
        vars.insert("DISPLAY_UTC_OFFSET", "0");
        vars.insert("SESSION_DIR", "/var/lib/cryptobot");
        vars.insert("DONATIONS_ETH", "0xabc");
        vars.insert("AUTHOR_NAME", "Ada");

        let config = BotConfig::from_source(&vars).unwrap();
        assert_eq!(config.port, 8443);
        assert_eq!(config.quote_timeout, Duration::from_millis(1500));
        assert_eq!(config.utc_offset_hours, 0);
        assert_eq!(config.session_dir, Some(PathBuf::from("/var/lib/cryptobot")));
        assert_eq!(config.info.author.name, "Ada");
        assert_eq!(
            config.donations.list(),
            vec![Donation {
                name: "ETH".to_string(),
                address: "0xabc".to_string()
            }]
        );
    }

    #[test]
    fn test_missing_token() {
        let vars = HashMap::from([("URL", "https://bot.example.com")]);
        let err = BotConfig::from_source(&vars).unwrap_err();
        assert!(err.to_string().contains("TELEGRAM_TOKEN"));
    }

    #[test]
    fn test_invalid_port() {
        let mut vars = base_vars();
        vars.insert("PORT", "eighty");
        assert!(matches!(
            BotConfig::from_source(&vars),
            Err(BotError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut vars = base_vars();
        vars.insert("QUOTE_TIMEOUT_MS", "0");
        assert!(BotConfig::from_source(&vars).is_err());
    }

    #[test]
    fn test_rejects_non_http_url() {
        let mut vars = base_vars();
        vars.insert("URL", "ftp://bot.example.com");
        assert!(BotConfig::from_source(&vars).is_err());
    }

    #[test]
    fn test_rejects_offset_out_of_range() {
        let mut vars = base_vars();
        vars.insert("DISPLAY_UTC_OFFSET", "30");
        assert!(BotConfig::from_source(&vars).is_err());
    }

    #[test]
    fn test_webhook_url() {
        let config = BotConfig::from_source(&base_vars()).unwrap();
        assert_eq!(
            config.webhook_url(),
            "https://bot.example.com/webhook/123456:ABCDEFGHIJ"
        );
    }

    #[test]
    fn test_debug_masks_token() {
        let config = BotConfig::from_source(&base_vars()).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("123456:ABCDEFGHIJ"));
        assert!(debug.contains("FGHIJ"));
    }

    #[test]
    fn test_donations_order() {
        let donations = Donations {
            btc: Some("1btc".to_string()),
            eth: None,
            paypal: Some("me@example.com".to_string()),
        };
        let names: Vec<_> = donations.list().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["BTC", "PayPal"]);
    }
}
