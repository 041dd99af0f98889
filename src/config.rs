//! Timing configuration for the busy handshake

/// Default upper bound for a single busy wait.
///
/// A full refresh with the single gray LUT takes a few seconds, slower when cold.
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 20_000;

/// Default interval between two reads of the busy line
pub const DEFAULT_BUSY_POLL_MS: u32 = 10;

/// Default delay after busy deasserted, the line drops slightly before the controller is ready
pub const DEFAULT_BUSY_SETTLE_MS: u32 = 200;

/// Driver configuration
///
/// ```
/// use epd3in7_sign::config::Config;
///
/// let config = Config::new().busy_timeout_ms(5_000).busy_poll_ms(20);
/// assert_eq!(config.busy_timeout(), 5_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    busy_timeout_ms: u32,
    busy_poll_ms: u32,
    busy_settle_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            busy_poll_ms: DEFAULT_BUSY_POLL_MS,
            busy_settle_ms: DEFAULT_BUSY_SETTLE_MS,
        }
    }
}

impl Config {
    /// Same as [`Config::default`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Give up on the busy line after `ms` milliseconds of polling
    pub fn busy_timeout_ms(mut self, ms: u32) -> Self {
        self.busy_timeout_ms = ms;
        self
    }

    /// Poll interval, clamped to at least 1ms so the timeout always advances
    pub fn busy_poll_ms(mut self, ms: u32) -> Self {
        self.busy_poll_ms = ms.max(1);
        self
    }

    /// Fixed delay served after every busy wait
    pub fn busy_settle_ms(mut self, ms: u32) -> Self {
        self.busy_settle_ms = ms;
        self
    }

    pub fn busy_timeout(&self) -> u32 {
        self.busy_timeout_ms
    }

    pub fn busy_poll(&self) -> u32 {
        self.busy_poll_ms
    }

    pub fn busy_settle(&self) -> u32 {
        self.busy_settle_ms
    }
}
