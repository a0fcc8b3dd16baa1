//! Provider abstraction for fetching market data from external APIs

use crate::error::ProviderError;
use crate::types::{CoinMover, GlobalStats, NewsItem, SortDirection};
use async_trait::async_trait;

/// Trait for market data providers
///
/// Implementations fetch the three report data sets (global stats, ranked
/// movers, news feed) from an external source. Formatting never touches the
/// network; everything behind this trait does.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetches global aggregate market stats
    async fn fetch_global(&self) -> Result<GlobalStats, ProviderError>;

    /// Fetches up to `count` coins ranked by 24h percent change
    ///
    /// `Descending` yields winners first, `Ascending` losers first; the
    /// returned order is the provider's ranking and is preserved downstream.
    async fn fetch_movers(
        &self,
        direction: SortDirection,
        count: usize,
    ) -> Result<Vec<CoinMover>, ProviderError>;

    /// Fetches up to `count` project status/news items
    async fn fetch_news(&self, count: usize) -> Result<Vec<NewsItem>, ProviderError>;

    /// Returns the name of this provider
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Programmable provider for testing the report pipeline
    ///
    /// Responses are queues per operation: each call pops the front entry,
    /// so a failure followed by a success exercises the retry path. An empty
    /// queue yields an ApiError.
    #[derive(Default)]
    pub struct MockProvider {
        global_responses: Mutex<Vec<Result<GlobalStats, ProviderError>>>,
        mover_responses: Mutex<Vec<Result<Vec<CoinMover>, ProviderError>>>,
        news_responses: Mutex<Vec<Result<Vec<NewsItem>, ProviderError>>>,
        call_count: Mutex<usize>,
    }

    impl MockProvider {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_global(&self, response: Result<GlobalStats, ProviderError>) {
            self.global_responses.lock().unwrap().push(response);
        }

        pub fn push_movers(&self, response: Result<Vec<CoinMover>, ProviderError>) {
            self.mover_responses.lock().unwrap().push(response);
        }

        pub fn push_news(&self, response: Result<Vec<NewsItem>, ProviderError>) {
            self.news_responses.lock().unwrap().push(response);
        }

        pub fn call_count(&self) -> usize {
            *self.call_count.lock().unwrap()
        }

        fn record_call(&self) {
            *self.call_count.lock().unwrap() += 1;
        }

        fn pop<T>(queue: &Mutex<Vec<Result<T, ProviderError>>>) -> Result<T, ProviderError> {
            let mut queue = queue.lock().unwrap();
            if queue.is_empty() {
                return Err(ProviderError::ApiError("no mock response queued".into()));
            }
            queue.remove(0)
        }
    }

    #[async_trait]
    impl MarketDataProvider for MockProvider {
        async fn fetch_global(&self) -> Result<GlobalStats, ProviderError> {
            self.record_call();
            Self::pop(&self.global_responses)
        }

        async fn fetch_movers(
            &self,
            _direction: SortDirection,
            count: usize,
        ) -> Result<Vec<CoinMover>, ProviderError> {
            self.record_call();
            Self::pop(&self.mover_responses).map(|mut movers| {
                movers.truncate(count);
                movers
            })
        }

        async fn fetch_news(&self, count: usize) -> Result<Vec<NewsItem>, ProviderError> {
            self.record_call();
            Self::pop(&self.news_responses).map(|mut items| {
                items.truncate(count);
                items
            })
        }

        fn provider_name(&self) -> &'static str {
            "mock"
        }
    }
}
