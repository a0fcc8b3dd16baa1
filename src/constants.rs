//! Constants for the market report bot
//!
//! Compile-time defaults live here; anything a deployment may want to tune
//! is also overridable through the environment (see `config.rs`).

/// CoinGecko API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko endpoint for global aggregate market stats
pub const COINGECKO_GLOBAL_ENDPOINT: &str = "/global";

/// CoinGecko endpoint for the ranked coin list
pub const COINGECKO_MARKETS_ENDPOINT: &str = "/coins/markets";

/// CoinGecko endpoint for the project status/news feed
pub const COINGECKO_STATUS_UPDATES_ENDPOINT: &str = "/status_updates";

/// HTTP request timeout when fetching market data (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Maximum number of attempts for a single section fetch (1 retry)
pub const MAX_FETCH_ATTEMPTS: u32 = 2;

/// Initial backoff delay before retrying a failed fetch (in milliseconds)
pub const INITIAL_BACKOFF_MS: u64 = 1000;

/// Maximum backoff delay for retries (in milliseconds)
pub const MAX_BACKOFF_MS: u64 = 8000;

/// Minimum interval between outbound CoinGecko calls (in milliseconds)
pub const DEFAULT_THROTTLE_INTERVAL_MS: u64 = 1000;

/// How long a cached CoinGecko response stays valid (in seconds)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Default number of winners/losers shown in the movers section
pub const DEFAULT_MOVERS_COUNT: usize = 3;

/// Default number of items shown in the news section
pub const DEFAULT_NEWS_COUNT: usize = 3;

/// Default character budget for a news item description
pub const DEFAULT_NEWS_DESCRIPTION_BUDGET: usize = 100;

/// User agent for HTTP requests
pub const USER_AGENT: &str = "dayrep-bot/0.1.0";
