//! Telegram command surface
//!
//! Three argument-less commands dispatched over long polling. Every error
//! past startup is absorbed at this boundary and turned into a single
//! user-visible line; nothing here can take the process down.

use crate::config::Config;
use crate::service::ReportService;
use crate::types::MarkupMode;
use std::sync::Arc;
use teloxide::{prelude::*, utils::command::BotCommands};

/// Line sent when a report could not be generated or delivered
const REPORT_ERROR_LINE: &str = "⚠️ Error generating report. Please try later.";

/// Supported bot commands
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "greeting and command list")]
    Start,
    #[command(description = "daily market report")]
    Daily,
    #[command(description = "weekly trends (coming soon)")]
    Weekly,
}

/// Runs the dispatcher until shutdown
pub async fn run(bot: Bot, service: Arc<ReportService>, config: Config) {
    let handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(answer);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![service, config])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn answer(
    bot: Bot,
    msg: Message,
    cmd: Command,
    service: Arc<ReportService>,
    config: Config,
) -> ResponseResult<()> {
    let mode = config.markup_mode;
    let text = match cmd {
        Command::Start => {
            let name = msg
                .from
                .as_ref()
                .map(|user| user.full_name())
                .unwrap_or_else(|| "Anonymous".to_string());
            greeting(&name, mode)
        }
        Command::Daily => service.daily_report().await,
        Command::Weekly => service.weekly_report(),
    };

    if let Err(e) = send(&bot, &msg, mode, text).await {
        tracing::warn!(chat_id = %msg.chat.id, error = %e, "Failed to deliver message");
        // Best effort, plain text so it cannot fail on markup
        bot.send_message(msg.chat.id, REPORT_ERROR_LINE).await?;
    }

    Ok(())
}

/// Sends a message with the configured parse mode (omitted for plain text)
async fn send(
    bot: &Bot,
    msg: &Message,
    mode: MarkupMode,
    text: String,
) -> Result<(), teloxide::RequestError> {
    let request = bot.send_message(msg.chat.id, text);
    match mode.parse_mode() {
        Some(parse_mode) => request.parse_mode(parse_mode).await?,
        None => request.await?,
    };
    Ok(())
}

/// Builds the /start greeting
///
/// The static copy is escaped alongside the user name so the message stays
/// valid MarkdownV2, where `!`, `-` and `.` are reserved.
pub fn greeting(name: &str, mode: MarkupMode) -> String {
    let name = mode.bold(&mode.escape(name));
    let tail = mode.escape(
        "\nI'm Dayrep - your crypto market analyst.\n\n\
         Commands:\n\
         /daily - Market snapshot\n\
         /weekly - Weekly trends (coming soon)",
    );
    format!("👋 Welcome, {}{}{}", name, mode.escape("!"), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_escapes_the_user_name() {
        let text = greeting("<Evil> & Co", MarkupMode::Html);
        assert!(text.contains("<b>&lt;Evil&gt; &amp; Co</b>"));
        assert!(!text.contains("<Evil>"));
    }

    #[test]
    fn greeting_is_valid_markdown_v2() {
        let text = greeting("Alice", MarkupMode::MarkdownV2);
        assert!(text.contains("*Alice*"));
        // Reserved characters in the static copy are escaped
        assert!(text.contains("Welcome, *Alice*\\!"));
        assert!(text.contains("\\- Market snapshot"));
    }

    #[test]
    fn greeting_lists_the_commands() {
        let text = greeting("Bob", MarkupMode::Plain);
        assert!(text.contains("/daily"));
        assert!(text.contains("/weekly"));
    }
}
