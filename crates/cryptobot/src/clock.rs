//! Wall clock used for reply timestamps

use chrono::{DateTime, FixedOffset, Utc};

/// Format of every timestamp the bot prints or logs
pub const DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Current time in the display offset
    fn now(&self) -> DateTime<FixedOffset>;

    /// Current time formatted with [`DATE_FORMAT`]
    fn stamp(&self) -> String {
        self.now().format(DATE_FORMAT).to_string()
    }
}

/// Reads the system clock and shifts it to a fixed offset
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// A clock stopped at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
