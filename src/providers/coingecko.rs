//! CoinGecko market data provider
//!
//! Consumes three endpoint shapes: global aggregate stats, the ranked coin
//! list filtered by 24h percent change, and the paginated status/news feed.
//! Outbound calls go through a minimum-interval throttle and a read-through
//! TTL cache keyed by the full request URL.

use crate::{
    cache::ResponseCache,
    config::Config,
    constants::{
        COINGECKO_GLOBAL_ENDPOINT, COINGECKO_MARKETS_ENDPOINT,
        COINGECKO_STATUS_UPDATES_ENDPOINT, REQUEST_TIMEOUT_SECS, USER_AGENT,
    },
    error::ProviderError,
    provider::MarketDataProvider,
    types::{CoinMover, GlobalStats, NewsItem, SortDirection},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

/// CoinGecko `/global` response envelope
#[derive(Debug, Deserialize)]
struct GlobalResponse {
    data: GlobalData,
}

#[derive(Debug, Deserialize)]
struct GlobalData {
    total_market_cap: HashMap<String, f64>,
    total_volume: HashMap<String, f64>,
    market_cap_percentage: HashMap<String, f64>,
    active_cryptocurrencies: u64,
}

/// One entry of the `/coins/markets` ranked list
#[derive(Debug, Deserialize)]
struct MarketCoin {
    name: String,
    price_change_percentage_24h: Option<f64>,
}

/// CoinGecko `/status_updates` response envelope
#[derive(Debug, Deserialize)]
struct StatusUpdatesResponse {
    status_updates: Vec<StatusUpdate>,
}

#[derive(Debug, Deserialize)]
struct StatusUpdate {
    project: Option<StatusProject>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusProject {
    name: Option<String>,
}

/// Minimum-interval gate between outbound API calls
///
/// Replaces the fixed sleeps some bot versions put between requests. The
/// lock is held across the wait so concurrent callers queue up behind it.
struct Throttle {
    interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl Throttle {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_call: Mutex::new(None),
        }
    }

    async fn acquire(&self) {
        let mut last = self.last_call.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.interval {
                sleep(self.interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// Live CoinGecko provider
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    cache: ResponseCache,
    throttle: Throttle,
}

impl CoinGeckoProvider {
    /// Creates a new CoinGecko provider from the bot configuration
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(ProviderError::NetworkError)?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            cache: ResponseCache::new(config.cache_ttl),
            throttle: Throttle::new(config.throttle_interval),
        })
    }

    /// Fetches a JSON payload, serving from the cache when fresh
    async fn fetch_json(&self, url: &str) -> Result<Value, ProviderError> {
        if let Some(cached) = self.cache.get(url).await {
            tracing::debug!(url, "Serving CoinGecko response from cache");
            return Ok(cached);
        }

        self.throttle.acquire().await;
        tracing::debug!(url, "Fetching from CoinGecko");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::NetworkError(e)
            }
        })?;

        if response.status().as_u16() == 429 {
            return Err(ProviderError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(ProviderError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let payload: Value = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse CoinGecko response: {}", e))
        })?;

        self.cache.insert(url, payload.clone()).await;
        Ok(payload)
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    async fn fetch_global(&self) -> Result<GlobalStats, ProviderError> {
        let url = format!("{}{}", self.base_url, COINGECKO_GLOBAL_ENDPOINT);
        let payload = self.fetch_json(&url).await?;
        parse_global(payload)
    }

    async fn fetch_movers(
        &self,
        direction: SortDirection,
        count: usize,
    ) -> Result<Vec<CoinMover>, ProviderError> {
        let url = format!(
            "{}{}?vs_currency=usd&order={}&per_page={}&page=1&price_change_percentage=24h",
            self.base_url,
            COINGECKO_MARKETS_ENDPOINT,
            direction.coingecko_order(),
            count,
        );
        let payload = self.fetch_json(&url).await?;
        parse_movers(payload)
    }

    async fn fetch_news(&self, count: usize) -> Result<Vec<NewsItem>, ProviderError> {
        let url = format!(
            "{}{}?per_page={}",
            self.base_url, COINGECKO_STATUS_UPDATES_ENDPOINT, count,
        );
        let payload = self.fetch_json(&url).await?;
        parse_news(payload)
    }

    fn provider_name(&self) -> &'static str {
        "coingecko"
    }
}

/// Parses the `/global` payload into a snapshot
fn parse_global(payload: Value) -> Result<GlobalStats, ProviderError> {
    let response: GlobalResponse = serde_json::from_value(payload)
        .map_err(|e| ProviderError::InvalidResponse(format!("global payload: {}", e)))?;
    let data = response.data;

    let market_cap = *data.total_market_cap.get("usd").ok_or_else(|| {
        ProviderError::InvalidResponse("total_market_cap.usd missing".to_string())
    })?;
    let volume = *data
        .total_volume
        .get("usd")
        .ok_or_else(|| ProviderError::InvalidResponse("total_volume.usd missing".to_string()))?;
    let btc_dominance = *data.market_cap_percentage.get("btc").ok_or_else(|| {
        ProviderError::InvalidResponse("market_cap_percentage.btc missing".to_string())
    })?;

    Ok(GlobalStats::new(
        market_cap,
        volume,
        btc_dominance,
        data.active_cryptocurrencies,
    ))
}

/// Parses a `/coins/markets` payload into movers, dropping entries with no
/// reported 24h change
fn parse_movers(payload: Value) -> Result<Vec<CoinMover>, ProviderError> {
    let coins: Vec<MarketCoin> = serde_json::from_value(payload)
        .map_err(|e| ProviderError::InvalidResponse(format!("markets payload: {}", e)))?;

    Ok(coins
        .into_iter()
        .filter_map(|coin| {
            coin.price_change_percentage_24h
                .map(|change| CoinMover::new(coin.name, change))
        })
        .collect())
}

/// Parses a `/status_updates` payload into news items
fn parse_news(payload: Value) -> Result<Vec<NewsItem>, ProviderError> {
    let response: StatusUpdatesResponse = serde_json::from_value(payload)
        .map_err(|e| ProviderError::InvalidResponse(format!("status_updates payload: {}", e)))?;

    Ok(response
        .status_updates
        .into_iter()
        .map(|update| {
            let project = update
                .project
                .and_then(|p| p.name)
                .unwrap_or_else(|| "Unknown".to_string());
            let description = update
                .description
                .unwrap_or_else(|| "No description".to_string());
            NewsItem::new(project, description)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_global_payload() {
        let payload = json!({
            "data": {
                "total_market_cap": {"usd": 2.5e12},
                "total_volume": {"usd": 95e9},
                "market_cap_percentage": {"btc": 52.37, "eth": 17.1},
                "active_cryptocurrencies": 10234
            }
        });
        let stats = parse_global(payload).unwrap();
        assert_eq!(stats.total_market_cap_usd, 2.5e12);
        assert_eq!(stats.total_volume_usd, 95e9);
        assert_eq!(stats.btc_dominance, 52.37);
        assert_eq!(stats.active_cryptocurrencies, 10234);
    }

    #[test]
    fn missing_btc_dominance_is_an_invalid_response() {
        let payload = json!({
            "data": {
                "total_market_cap": {"usd": 1.0},
                "total_volume": {"usd": 1.0},
                "market_cap_percentage": {"eth": 17.1},
                "active_cryptocurrencies": 1
            }
        });
        let err = parse_global(payload).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[test]
    fn parses_movers_and_drops_entries_without_change() {
        let payload = json!([
            {"name": "Upcoin", "price_change_percentage_24h": 14.2},
            {"name": "Fresh Listing", "price_change_percentage_24h": null},
            {"name": "Downcoin", "price_change_percentage_24h": -9.9}
        ]);
        let movers = parse_movers(payload).unwrap();
        assert_eq!(movers.len(), 2);
        assert_eq!(movers[0].name, "Upcoin");
        assert_eq!(movers[1].change_24h, -9.9);
    }

    #[test]
    fn parses_news_with_fallbacks_for_missing_fields() {
        let payload = json!({
            "status_updates": [
                {"project": {"name": "CoolChain"}, "description": "Mainnet live"},
                {"project": null, "description": null}
            ]
        });
        let items = parse_news(payload).unwrap();
        assert_eq!(items[0].project, "CoolChain");
        assert_eq!(items[0].description, "Mainnet live");
        assert_eq!(items[1].project, "Unknown");
        assert_eq!(items[1].description, "No description");
    }

    #[test]
    fn malformed_payload_is_an_invalid_response() {
        let err = parse_movers(json!({"unexpected": "shape"})).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn fresh_cache_entry_is_served_without_a_network_call() {
        // An unroutable base URL: any network attempt would error out
        let config = Config {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..Config::default()
        };
        let provider = CoinGeckoProvider::new(&config).unwrap();

        let url = format!("{}{}", config.api_base_url, COINGECKO_GLOBAL_ENDPOINT);
        provider
            .cache
            .insert(
                &url,
                json!({
                    "data": {
                        "total_market_cap": {"usd": 2.5e12},
                        "total_volume": {"usd": 95e9},
                        "market_cap_percentage": {"btc": 52.37},
                        "active_cryptocurrencies": 10234
                    }
                }),
            )
            .await;

        let stats = provider.fetch_global().await.unwrap();
        assert_eq!(stats.active_cryptocurrencies, 10234);
        assert_eq!(stats.btc_dominance, 52.37);
    }

    #[tokio::test]
    async fn throttle_enforces_minimum_interval() {
        let throttle = Throttle::new(Duration::from_millis(30));
        let start = Instant::now();
        throttle.acquire().await;
        throttle.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn zero_interval_throttle_does_not_wait() {
        let throttle = Throttle::new(Duration::from_millis(0));
        let start = Instant::now();
        throttle.acquire().await;
        throttle.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(20));
    }
}
