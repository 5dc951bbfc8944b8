//! Telegram Bot API channel.
//!
//! The bot is attached to the owner's account as a Telegram Business chatbot.
//! It long-polls `getUpdates` for `business_message` updates and rewrites the
//! owner's messages with `editMessageText`.
//! Docs: <https://core.telegram.org/bots/api#business-connection>

mod markdown;
mod polling;
mod send;
pub(crate) mod types;

#[cfg(test)]
mod tests;

pub use send::BotInfo;

use ortho_core::config::TelegramConfig;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Telegram channel using the Bot API with long polling.
pub struct TelegramChannel {
    config: TelegramConfig,
    client: reqwest::Client,
    base_url: String,
    /// Tracks the last update_id to avoid reprocessing.
    last_update_id: Arc<Mutex<Option<i64>>>,
}

impl TelegramChannel {
    /// Create a new Telegram channel from config.
    pub fn new(config: TelegramConfig) -> Self {
        let base_url = format!("https://api.telegram.org/bot{}", config.bot_token);
        Self {
            config,
            client: reqwest::Client::new(),
            base_url,
            last_update_id: Arc::new(Mutex::new(None)),
        }
    }

    /// The account whose messages this channel delivers as "self".
    pub fn owner_id(&self) -> i64 {
        self.config.owner_id
    }
}
