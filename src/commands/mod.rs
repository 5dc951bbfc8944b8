//! Control commands — classify an incoming message into exactly one route.

#[cfg(test)]
mod tests;

use ortho_core::message::IncomingMessage;

/// Confirmation shown after `start`.
pub const ACTIVE_REPLY: &str =
    "✅ <b>Bot is active!</b>\nNow all your messages will be checked for <b>mistakes</b>.";

/// Status line while corrections are applied.
pub const STATUS_ACTIVE: &str = "✅ <b>Active</b>";

/// Status line while corrections are paused.
pub const STATUS_INACTIVE: &str = "🛑 <b>Inactive</b>";

/// Confirmation shown after `stop`. Names the start command for `prefix`.
pub fn inactive_reply(prefix: &str) -> String {
    format!(
        "🛑 <b>Bot is inactive!</b>\nSend <code>{}start</code> to activate message checking again.",
        escape_html(prefix)
    )
}

/// What to do with one incoming message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Activate,
    Deactivate,
    Status,
    /// Run the text through the correction pipeline.
    Correct,
    /// Not ours to touch.
    Ignore,
}

impl Route {
    /// Classify `msg`. Only messages written by `self_id` are ever routed
    /// anywhere but `Ignore`; commands must match exactly (case-sensitive).
    pub fn classify(msg: &IncomingMessage, self_id: &str, prefix: &str) -> Self {
        if msg.sender_id != self_id {
            return Self::Ignore;
        }

        let text = msg.text.as_str();
        match text.strip_prefix(prefix) {
            Some("start") => Self::Activate,
            Some("stop") => Self::Deactivate,
            Some("status") => Self::Status,
            _ if text.trim().is_empty() => Self::Ignore,
            _ => Self::Correct,
        }
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
