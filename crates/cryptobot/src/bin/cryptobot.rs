//! Crypto quote bot server
//!
//! # Usage
//!
//! ```bash
//! export TELEGRAM_TOKEN="123456:ABC..."
//! export URL="https://bot.example.com"
//!
//! cargo run --bin cryptobot -p cryptobot -- --port 3000
//! ```

use clap::Parser;
use cryptobot::api::{CryptoMktClient, SurBtcClient, http_client};
use cryptobot::bot::{BotServices, build_dispatcher, load_commands};
use cryptobot::clock::SystemClock;
use cryptobot::config::BotConfig;
use cryptobot::interface::{FileSessionStore, InMemorySessionStore, SessionStore};
use cryptobot::market::MarketBook;
use cryptobot::platforms::telegram::{self, TelegramClient, WebhookState};
use cryptobot::prompts::default_registry;
use cryptobot_utils::{LogFormat, ProcessEnv, VarSource, init_tracing, mask_secret};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "cryptobot")]
#[command(about = "Telegram bot relaying BTC/CLP and ETH/CLP exchange quotes", long_about = None)]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Public base URL the webhook is registered under (overrides URL)
    #[arg(short, long)]
    url: Option<String>,

    /// Directory for file-backed sessions (overrides SESSION_DIR)
    #[arg(long)]
    session_dir: Option<PathBuf>,

    /// Log output format: pretty or json
    #[arg(long, env = "LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,

    /// Skip the setWebhook call at startup
    #[arg(long)]
    no_webhook_registration: bool,
}

/// Command-line flags layered over the process environment
struct Overrides(HashMap<&'static str, String>);

impl Overrides {
    fn from_args(args: &Args) -> Self {
        let mut vars = HashMap::new();
        if let Some(port) = args.port {
            vars.insert("PORT", port.to_string());
        }
        if let Some(url) = &args.url {
            vars.insert("URL", url.clone());
        }
        if let Some(dir) = &args.session_dir {
            vars.insert("SESSION_DIR", dir.display().to_string());
        }
        Self(vars)
    }
}

impl VarSource for Overrides {
    fn var(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned().or_else(|| ProcessEnv.var(key))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);

    let config = BotConfig::from_source(&Overrides::from_args(&args))?;
    config.validate()?;

    info!(
        url = %config.url,
        port = config.port,
        token = %mask_secret(&config.telegram_token),
        "Starting cryptobot"
    );

    let http = http_client(config.quote_timeout)?;
    let book = MarketBook::standard(
        Arc::new(SurBtcClient::new(http.clone())),
        Arc::new(CryptoMktClient::new(http)),
    );

    let sessions: Arc<dyn SessionStore> = match &config.session_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Using file session store");
            Arc::new(FileSessionStore::new(dir))
        }
        None => {
            warn!("SESSION_DIR not set, sessions are kept in memory");
            Arc::new(InMemorySessionStore::new())
        }
    };

    let client = Arc::new(TelegramClient::new(
        reqwest::Client::new(),
        &config.telegram_token,
    ));

    let dispatcher = build_dispatcher(BotServices {
        templates: Arc::new(default_registry()?),
        sessions,
        messenger: client.clone(),
        clock: Arc::new(SystemClock::new(config.utc_offset()?)),
        book,
        commands: load_commands(config.commands_path.as_deref()).await?,
        info: config.info.clone(),
        donations: config.donations.list(),
    })?;

    if args.no_webhook_registration {
        info!("Skipping webhook registration");
    } else {
        client.set_webhook(&config.webhook_url()).await?;
        info!(url = %config.url, "Webhook registered");
    }

    let state = WebhookState::new(&config.telegram_token, Arc::new(dispatcher));
    telegram::serve(&config.listen_addr(), state).await?;

    Ok(())
}
