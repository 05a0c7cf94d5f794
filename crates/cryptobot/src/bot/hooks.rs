//! Hooks run before every handler

use crate::clock::Clock;
use crate::interface::Inbound;
use std::sync::Arc;
use tracing::info;

/// Observes an update before it is dispatched
///
/// Hooks cannot stop or alter dispatch.
pub trait BeforeHook: Send + Sync {
    fn before(&self, inbound: &Inbound);
}

/// Logs one structured line per update
pub struct LoggingHook {
    clock: Arc<dyn Clock>,
}

impl LoggingHook {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl BeforeHook for LoggingHook {
    fn before(&self, inbound: &Inbound) {
        info!(
            timestamp = %self.clock.stamp(),
            user = %inbound.sender.handle(),
            user_id = inbound.sender.id,
            language = inbound.sender.language_code.as_deref().unwrap_or("-"),
            chat = inbound.chat_id,
            command = %inbound.command,
            args = %inbound.args,
            callback = inbound.is_callback(),
            "Inbound command"
        );
    }
}
