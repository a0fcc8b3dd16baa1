//! # Dayrep — crypto market report bot
//!
//! A single-purpose Telegram bot that fetches global market stats, top
//! gainers/losers and project news from CoinGecko and renders them as one
//! formatted chat message.
//!
//! The formatting pipeline (numeric abbreviation, markup escaping, section
//! composition) is pure and lives in [`format`] and [`report`]; everything
//! touching the network sits behind the [`provider::MarketDataProvider`]
//! trait. The markup dialect, list sizes and description budget are
//! configuration options, not code paths.
//!
//! ## Usage
//!
//! ```no_run
//! use dayrep_bot::config::Config;
//! use dayrep_bot::providers::CoinGeckoProvider;
//! use dayrep_bot::service::ReportService;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let provider = Arc::new(CoinGeckoProvider::new(&config)?);
//! let service = ReportService::new(provider, &config);
//!
//! let report = service.daily_report().await;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod bot;
pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod provider;
pub mod providers;
pub mod report;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{ProviderError, ReportError};
pub use service::ReportService;
pub use types::{CoinMover, GlobalStats, MarkupMode, NewsItem, SortDirection};
