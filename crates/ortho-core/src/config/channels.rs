use serde::{Deserialize, Serialize};

use super::defaults::default_true;

/// Channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChannelConfig {
    pub telegram: Option<TelegramConfig>,
}

/// Telegram bot config.
///
/// The bot must be attached to the owner's account as a Telegram Business
/// chatbot; only messages written by `owner_id` are ever acted on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub bot_token: String,
    /// Telegram user ID of the account whose messages are corrected.
    #[serde(default)]
    pub owner_id: i64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bot_token: String::new(),
            owner_id: 0,
        }
    }
}
