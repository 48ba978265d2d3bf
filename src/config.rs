use std::env;
use std::time::Duration;

/// Collector and viewer share one SQLite database; `mode=rwc` creates the
/// file on first run.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://market.db?mode=rwc";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

pub const DEFAULT_PRICES_BASE_URL: &str = "https://prices.runescape.wiki/api/v1/osrs";

/// The wiki API asks for a descriptive User-Agent from automated clients.
pub const DEFAULT_USER_AGENT: &str = "osrs-price-tracker/0.1 (Grand Exchange price monitor)";

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub prices_base_url: String,
    pub user_agent: String,
    /// Pause between collector cycles, measured from the end of one cycle
    pub poll_interval: Duration,
    /// `None` keeps the startup item mapping for the process lifetime
    pub mapping_refresh: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Self {
        let poll_secs = env::var("POLL_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

        // 0 (the default) disables periodic mapping refresh
        let refresh_secs = env::var("MAPPING_REFRESH_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            prices_base_url: env::var("PRICES_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_PRICES_BASE_URL.to_string()),
            user_agent: env::var("PRICES_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            poll_interval: Duration::from_secs(poll_secs),
            mapping_refresh: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
        }
    }
}
