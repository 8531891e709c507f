//! Server configuration read from the environment.

use log::warn;
use std::str::FromStr;
use std::time::Duration;

/// Runtime settings for the web binary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    /// Bind address. `0.0.0.0` so the app is reachable via DNS on a VPS.
    pub host: String,
    pub port: u16,
    /// Tournaments not accessed for this long are removed.
    pub inactivity_timeout: Duration,
    /// How often the cleanup task runs.
    pub cleanup_interval: Duration,
    /// Directory served under `/static`.
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            inactivity_timeout: Duration::from_secs(12 * 3600),
            cleanup_interval: Duration::from_secs(30 * 60),
            static_dir: "static".to_string(),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `INACTIVITY_TIMEOUT_HOURS`, `CLEANUP_INTERVAL_MINUTES`, `STATIC_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Missing keys use defaults; unparsable values are logged and
    /// ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parsed(&lookup, "PORT").unwrap_or(defaults.port),
            inactivity_timeout: duration(&lookup, "INACTIVITY_TIMEOUT_HOURS", 3600)
                .unwrap_or(defaults.inactivity_timeout),
            cleanup_interval: duration(&lookup, "CLEANUP_INTERVAL_MINUTES", 60)
                .unwrap_or(defaults.cleanup_interval),
            static_dir: lookup("STATIC_DIR").unwrap_or(defaults.static_dir),
        }
    }
}

/// Longest accepted timeout or interval, so timer arithmetic cannot overflow.
const MAX_DURATION_SECS: u64 = 366 * 24 * 3600;

/// A positive count of `unit_secs`-long units, at most a year. Other values are ignored.
fn duration(lookup: &impl Fn(&str) -> Option<String>, key: &str, unit_secs: u64) -> Option<Duration> {
    let count: u64 = parsed(lookup, key)?;
    match count.checked_mul(unit_secs) {
        Some(secs) if (1..=MAX_DURATION_SECS).contains(&secs) => Some(Duration::from_secs(secs)),
        _ => {
            warn!("ignoring {key}={count}: out of range, using default");
            None
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {key}={raw:?}: not a valid value, using default");
            None
        }
    }
}
