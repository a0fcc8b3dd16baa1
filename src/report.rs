//! Section composer for the market report
//!
//! Pure functions that turn already-fetched market data into the chat-facing
//! text block. All dynamic fields are escaped for the target markup mode
//! before literal template markup is assembled around them; composed entries
//! with no inner markup (mover lines, news descriptions) are escaped whole.

use crate::config::Config;
use crate::format::{format_magnitude, format_percent, group_thousands};
use crate::types::{CoinMover, GlobalStats, MarkupMode, NewsItem};

/// User-facing line shown when the snapshot fetch failed
pub const SNAPSHOT_FAILURE_LINE: &str = "❌ Failed to fetch market data";

/// User-facing line shown when the movers fetch failed
pub const MOVERS_FAILURE_LINE: &str = "❌ Failed to fetch market movers";

/// User-facing line shown when the news fetch failed
pub const NEWS_FAILURE_LINE: &str = "❌ Failed to fetch news";

/// Ellipsis marker appended to truncated news descriptions
const ELLIPSIS: &str = "...";

/// Rendering options for a single report
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Target markup dialect
    pub mode: MarkupMode,
    /// Winners/losers shown per sub-list
    pub movers_count: usize,
    /// News items shown
    pub news_count: usize,
    /// Character budget for a news description
    pub news_description_budget: usize,
}

impl From<&Config> for ReportOptions {
    fn from(config: &Config) -> Self {
        Self {
            mode: config.markup_mode,
            movers_count: config.movers_count,
            news_count: config.news_count,
            news_description_budget: config.news_description_budget,
        }
    }
}

/// Formats the global stats snapshot as a bulleted block
pub fn snapshot_section(stats: &GlobalStats, mode: MarkupMode) -> String {
    let header = mode.bold("📈 Market Snapshot");
    let market_cap = mode.escape(&format_magnitude(stats.total_market_cap_usd));
    let volume = mode.escape(&format_magnitude(stats.total_volume_usd));
    let dominance = mode.escape(&format!("{:.2}", stats.btc_dominance));
    let active = mode.escape(&group_thousands(stats.active_cryptocurrencies));

    format!(
        "{header}\n\n\
         • Total Market Cap: ${market_cap}\n\
         • 24h Volume: ${volume}\n\
         • BTC Dominance: {dominance}%\n\
         • Active Cryptos: {active}"
    )
}

/// Formats winners and losers as two labeled sub-lists
///
/// Input sequences arrive pre-sorted (winners descending, losers ascending by
/// 24h change); truncation to `movers_count` preserves that order.
pub fn movers_section(winners: &[CoinMover], losers: &[CoinMover], opts: &ReportOptions) -> String {
    let header = opts.mode.bold("📊 Top Movers");
    let winners_label = opts.mode.bold("🚀 Winners:");
    let losers_label = opts.mode.bold("📉 Losers:");

    format!(
        "{header}\n\n{winners_label}\n{}\n\n{losers_label}\n{}",
        mover_lines(winners, opts),
        mover_lines(losers, opts),
    )
}

fn mover_lines(movers: &[CoinMover], opts: &ReportOptions) -> String {
    if movers.is_empty() {
        return "• No data".to_string();
    }
    movers
        .iter()
        .take(opts.movers_count)
        .map(|mover| {
            // Escaped as one field: the entry carries no inner markup
            let entry = format!("{} ({})", mover.name, format_percent(mover.change_24h));
            format!("• {}", opts.mode.escape(&entry))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats the news feed as a bulleted list with bolded project names
pub fn news_section(items: &[NewsItem], opts: &ReportOptions) -> String {
    let header = opts.mode.bold("🗞️ Latest News");
    let lines = items
        .iter()
        .take(opts.news_count)
        .map(|item| {
            let project = opts.mode.bold(&opts.mode.escape(&item.project));
            let description = opts.mode.escape(&truncate_description(
                &item.description,
                opts.news_description_budget,
            ));
            format!("• {}: {}", project, description)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{header}\n\n{lines}")
}

/// Truncates a description to `budget` characters, appending an ellipsis
/// only when truncation actually occurred
fn truncate_description(description: &str, budget: usize) -> String {
    if description.chars().count() <= budget {
        return description.to_string();
    }
    let mut truncated: String = description.chars().take(budget).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Joins non-empty sections with a blank-line separator, in fixed order
pub fn assemble_report(sections: &[String]) -> String {
    sections
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n\n")
}
