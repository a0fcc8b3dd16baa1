use dayrep_bot::bot;
use dayrep_bot::config::Config;
use dayrep_bot::provider::MarketDataProvider;
use dayrep_bot::providers::CoinGeckoProvider;
use dayrep_bot::service::ReportService;
use std::sync::Arc;
use teloxide::Bot;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;
    info!(
        markup_mode = config.markup_mode.name(),
        movers_count = config.movers_count,
        news_count = config.news_count,
        "Starting dayrep bot"
    );

    let provider = Arc::new(CoinGeckoProvider::new(&config)?);
    info!(provider = provider.provider_name(), "Market data provider ready");
    let service = Arc::new(ReportService::new(provider, &config));
    let bot = Bot::new(config.bot_token.clone());

    bot::run(bot, service, config).await;

    info!("Bot stopped");
    Ok(())
}
