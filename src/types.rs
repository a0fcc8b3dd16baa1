//! Types for the market report bot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use teloxide::types::ParseMode;

/// Aggregate market statistics at a point in time
///
/// Immutable snapshot fetched once per report and discarded after rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalStats {
    /// Total market capitalization in USD
    pub total_market_cap_usd: f64,

    /// 24h trading volume in USD
    pub total_volume_usd: f64,

    /// BTC dominance as a percentage (0-100)
    pub btc_dominance: f64,

    /// Number of active cryptocurrencies
    pub active_cryptocurrencies: u64,

    /// When this snapshot was fetched
    pub fetched_at: DateTime<Utc>,
}

impl GlobalStats {
    /// Create a new snapshot stamped with the current time
    pub fn new(
        total_market_cap_usd: f64,
        total_volume_usd: f64,
        btc_dominance: f64,
        active_cryptocurrencies: u64,
    ) -> Self {
        Self {
            total_market_cap_usd,
            total_volume_usd,
            btc_dominance,
            active_cryptocurrencies,
            fetched_at: Utc::now(),
        }
    }
}

/// A coin with a large 24h percent price change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinMover {
    /// Display name as reported by the provider (may contain markup characters)
    pub name: String,

    /// Signed 24h percent change
    pub change_24h: f64,
}

impl CoinMover {
    pub fn new(name: impl Into<String>, change_24h: f64) -> Self {
        Self {
            name: name.into(),
            change_24h,
        }
    }
}

/// A project status/news item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    /// Project display name
    pub project: String,

    /// Free-text description (may contain markup characters)
    pub description: String,
}

impl NewsItem {
    pub fn new(project: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            description: description.into(),
        }
    }
}

/// Sort order for the ranked coin list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Largest positive 24h change first (winners)
    Descending,
    /// Largest negative 24h change first (losers)
    Ascending,
}

impl SortDirection {
    /// Get the CoinGecko `order` query value for this direction
    pub fn coingecko_order(&self) -> &'static str {
        match self {
            SortDirection::Descending => "gecko_desc",
            SortDirection::Ascending => "gecko_asc",
        }
    }
}

/// Target message-formatting dialect for the rendered report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkupMode {
    /// No markup, no escaping
    Plain,
    /// Telegram HTML subset
    #[default]
    Html,
    /// Telegram MarkdownV2
    MarkdownV2,
}

impl MarkupMode {
    /// Parse a markup mode from its configuration name
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "plain" | "text" => Some(MarkupMode::Plain),
            "html" => Some(MarkupMode::Html),
            "markdownv2" | "markdown_v2" | "mdv2" => Some(MarkupMode::MarkdownV2),
            _ => None,
        }
    }

    /// Get the Telegram parse mode for this dialect (None for plain text)
    pub fn parse_mode(&self) -> Option<ParseMode> {
        match self {
            MarkupMode::Plain => None,
            MarkupMode::Html => Some(ParseMode::Html),
            MarkupMode::MarkdownV2 => Some(ParseMode::MarkdownV2),
        }
    }

    /// Get the configuration name of this mode
    pub fn name(&self) -> &'static str {
        match self {
            MarkupMode::Plain => "plain",
            MarkupMode::Html => "html",
            MarkupMode::MarkdownV2 => "markdownv2",
        }
    }
}
