//! Report building service
//!
//! Orchestrates the provider fetches for one report request and applies the
//! degrade policy: a failed section is replaced by a single failure line and
//! the rest of the report is still delivered. Fetches run sequentially (the
//! provider throttle paces the underlying calls) with one bounded retry and
//! exponential backoff per section.

use crate::{
    config::Config,
    constants::{INITIAL_BACKOFF_MS, MAX_BACKOFF_MS, MAX_FETCH_ATTEMPTS},
    error::ProviderError,
    provider::MarketDataProvider,
    report::{
        assemble_report, movers_section, news_section, snapshot_section, ReportOptions,
        MOVERS_FAILURE_LINE, NEWS_FAILURE_LINE, SNAPSHOT_FAILURE_LINE,
    },
    types::{CoinMover, SortDirection},
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Placeholder line for the not-yet-implemented weekly report
const WEEKLY_PLACEHOLDER: &str = "📆 Weekly report feature is in development!";

/// Builds market reports from a data provider
pub struct ReportService {
    provider: Arc<dyn MarketDataProvider>,
    options: ReportOptions,
}

impl ReportService {
    /// Creates a report service over a provider, with rendering options
    /// taken from the bot configuration
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: &Config) -> Self {
        Self {
            provider,
            options: ReportOptions::from(config),
        }
    }

    /// Builds the daily report
    ///
    /// Always produces a report; sections whose fetch failed after the retry
    /// budget render as a single failure line.
    pub async fn daily_report(&self) -> String {
        let snapshot = self.build_snapshot().await;
        let movers = self.build_movers().await;
        let news = self.build_news().await;
        assemble_report(&[snapshot, movers, news])
    }

    /// Returns the weekly report placeholder
    ///
    /// Escaped for the configured markup mode; the copy contains characters
    /// that are reserved in MarkdownV2.
    pub fn weekly_report(&self) -> String {
        self.options.mode.escape(WEEKLY_PLACEHOLDER)
    }

    async fn build_snapshot(&self) -> String {
        let provider = self.provider.clone();
        let result = with_retry("snapshot", move || {
            let provider = provider.clone();
            async move { provider.fetch_global().await }
        })
        .await;

        match result {
            Ok(stats) => snapshot_section(&stats, self.options.mode),
            Err(e) => {
                tracing::warn!(error = %e, "Snapshot section degraded");
                SNAPSHOT_FAILURE_LINE.to_string()
            }
        }
    }

    async fn build_movers(&self) -> String {
        let count = self.options.movers_count;
        let winners = self.fetch_movers_with_retry(SortDirection::Descending, count);
        // Sequential on purpose: the provider throttle spaces the two calls
        let winners = winners.await;
        let losers = self
            .fetch_movers_with_retry(SortDirection::Ascending, count)
            .await;

        match (winners, losers) {
            (Ok(winners), Ok(losers)) => movers_section(&winners, &losers, &self.options),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, "Movers section degraded");
                MOVERS_FAILURE_LINE.to_string()
            }
        }
    }

    async fn fetch_movers_with_retry(
        &self,
        direction: SortDirection,
        count: usize,
    ) -> Result<Vec<CoinMover>, ProviderError> {
        let provider = self.provider.clone();
        with_retry("movers", move || {
            let provider = provider.clone();
            async move { provider.fetch_movers(direction, count).await }
        })
        .await
    }

    async fn build_news(&self) -> String {
        let provider = self.provider.clone();
        let count = self.options.news_count;
        let result = with_retry("news", move || {
            let provider = provider.clone();
            async move { provider.fetch_news(count).await }
        })
        .await;

        match result {
            Ok(items) => news_section(&items, &self.options),
            Err(e) => {
                tracing::warn!(error = %e, "News section degraded");
                NEWS_FAILURE_LINE.to_string()
            }
        }
    }
}

/// Runs a fetch with bounded retries and exponential backoff
async fn with_retry<T, Fut>(
    section: &'static str,
    mut fetch: impl FnMut() -> Fut,
) -> Result<T, ProviderError>
where
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut backoff_ms = INITIAL_BACKOFF_MS;
    let mut attempt = 1;

    loop {
        match fetch().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < MAX_FETCH_ATTEMPTS => {
                tracing::warn!(
                    section,
                    attempt,
                    max_attempts = MAX_FETCH_ATTEMPTS,
                    error = %e,
                    "Fetch failed, retrying"
                );
                sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms = (backoff_ms * 2).min(MAX_BACKOFF_MS);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
