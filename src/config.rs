//! Server configuration from environment variables.

use std::time::Duration;

/// Pause inserted between writes of a batch score entry. The engine never
/// paces itself; the I/O layer applies this when the store rate-limits.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PacingPolicy {
    pub delay: Duration,
}

impl PacingPolicy {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Delay to wait before the write at `index` of a batch (none before the first).
    pub fn delay_before(&self, index: usize) -> Option<Duration> {
        (index > 0 && !self.delay.is_zero()).then_some(self.delay)
    }
}

/// Listen address and batch pacing for the web binary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub pacing: PacingPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            pacing: PacingPolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT` and `BATCH_DELAY_MS`; unset or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(default_host);
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let delay_ms: u64 = lookup("BATCH_DELAY_MS")
            .and_then(|d| d.parse().ok())
            .unwrap_or(0);
        Self {
            host,
            port,
            pacing: PacingPolicy::new(Duration::from_millis(delay_ms)),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}
