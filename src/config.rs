//! Runtime configuration loaded from the environment
//!
//! Built once at process start and passed into the command-handling and
//! provider paths; there is no ambient global lookup.

use crate::constants::{
    COINGECKO_API_URL, DEFAULT_CACHE_TTL_SECS, DEFAULT_MOVERS_COUNT, DEFAULT_NEWS_COUNT,
    DEFAULT_NEWS_DESCRIPTION_BUDGET, DEFAULT_THROTTLE_INTERVAL_MS,
};
use crate::error::ReportError;
use crate::types::MarkupMode;
use std::time::Duration;

/// Bot configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token
    pub bot_token: String,

    /// Market data API base URL
    pub api_base_url: String,

    /// Markup dialect for rendered reports
    pub markup_mode: MarkupMode,

    /// Winners/losers shown per sub-list in the movers section
    pub movers_count: usize,

    /// Items shown in the news section
    pub news_count: usize,

    /// Character budget for a news item description
    pub news_description_budget: usize,

    /// How long a cached provider response stays valid
    pub cache_ttl: Duration,

    /// Minimum interval between outbound provider calls
    pub throttle_interval: Duration,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// `BOT_TOKEN` is required; everything else falls back to the defaults
    /// in `constants.rs`.
    pub fn from_env() -> Result<Self, ReportError> {
        let bot_token = std::env::var("BOT_TOKEN")
            .map_err(|_| ReportError::config("BOT_TOKEN is not set"))?;

        let api_base_url =
            std::env::var("COINGECKO_API_URL").unwrap_or_else(|_| COINGECKO_API_URL.to_string());

        let markup_mode = match std::env::var("MARKUP_MODE") {
            Ok(name) => MarkupMode::parse(&name).ok_or_else(|| {
                ReportError::config(format!(
                    "unknown MARKUP_MODE '{}' (expected plain, html or markdownv2)",
                    name
                ))
            })?,
            Err(_) => MarkupMode::default(),
        };

        Ok(Self {
            bot_token,
            api_base_url,
            markup_mode,
            movers_count: env_parse("MOVERS_COUNT", DEFAULT_MOVERS_COUNT)?,
            news_count: env_parse("NEWS_COUNT", DEFAULT_NEWS_COUNT)?,
            news_description_budget: env_parse(
                "NEWS_DESCRIPTION_BUDGET",
                DEFAULT_NEWS_DESCRIPTION_BUDGET,
            )?,
            cache_ttl: Duration::from_secs(env_parse("CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?),
            throttle_interval: Duration::from_millis(env_parse(
                "THROTTLE_INTERVAL_MS",
                DEFAULT_THROTTLE_INTERVAL_MS,
            )?),
        })
    }
}

impl Default for Config {
    /// Defaults for tests; `bot_token` is empty and must come from the
    /// environment in production code.
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_base_url: COINGECKO_API_URL.to_string(),
            markup_mode: MarkupMode::default(),
            movers_count: DEFAULT_MOVERS_COUNT,
            news_count: DEFAULT_NEWS_COUNT,
            news_description_budget: DEFAULT_NEWS_DESCRIPTION_BUDGET,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            throttle_interval: Duration::from_millis(DEFAULT_THROTTLE_INTERVAL_MS),
        }
    }
}

/// Parse an optional environment variable, falling back to a default
fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ReportError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ReportError::config(format!("invalid value for {}: '{}'", key, raw))),
        Err(_) => Ok(default),
    }
}
