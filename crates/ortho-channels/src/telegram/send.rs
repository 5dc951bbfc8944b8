//! Outbound calls: editing messages in place and identity lookup.

use super::types::TgResponse;
use super::TelegramChannel;
use ortho_core::{
    error::OrthoError,
    message::{MessageEdit, TextFormat},
};
use serde::Deserialize;
use tracing::{debug, warn};

/// Bot identity as returned by `getMe`.
#[derive(Debug, Deserialize)]
pub struct BotInfo {
    pub id: i64,
    pub username: Option<String>,
}

/// What to do with a failed `editMessageText` response body.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum EditFailure {
    /// Telegram refused the formatting; resend without `parse_mode`.
    RetryPlain,
    /// The message already has exactly this content.
    AlreadyApplied,
    Fatal,
}

pub(crate) fn classify_edit_failure(error_text: &str) -> EditFailure {
    if error_text.contains("can't parse entities") {
        EditFailure::RetryPlain
    } else if error_text.contains("message is not modified") {
        EditFailure::AlreadyApplied
    } else {
        EditFailure::Fatal
    }
}

pub(crate) fn parse_mode(format: TextFormat) -> &'static str {
    match format {
        TextFormat::Html => "HTML",
        TextFormat::Markdown => "Markdown",
    }
}

/// Build the `editMessageText` body for `edit`. `None` sends plain text.
pub(crate) fn edit_body(
    edit: &MessageEdit,
    format: Option<TextFormat>,
) -> Result<serde_json::Value, OrthoError> {
    let chat_id: i64 = edit.target.chat_id.parse().map_err(|e| {
        OrthoError::Channel(format!(
            "invalid telegram chat_id '{}': {e}",
            edit.target.chat_id
        ))
    })?;
    let message_id: i64 = edit.target.message_id.parse().map_err(|e| {
        OrthoError::Channel(format!(
            "invalid telegram message_id '{}': {e}",
            edit.target.message_id
        ))
    })?;

    let mut body = serde_json::json!({
        "chat_id": chat_id,
        "message_id": message_id,
        "text": edit.text,
    });
    if let Some(format) = format {
        body["parse_mode"] = parse_mode(format).into();
    }
    if let Some(conn) = &edit.target.connection_id {
        body["business_connection_id"] = conn.clone().into();
    }
    Ok(body)
}

impl TelegramChannel {
    /// Replace a message's text. Not retried on failure.
    pub(crate) async fn edit_text(&self, edit: &MessageEdit) -> Result<(), OrthoError> {
        let url = format!("{}/editMessageText", self.base_url);
        let body = edit_body(edit, Some(edit.format))?;

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| OrthoError::Channel(format!("telegram edit failed: {e}")))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let error_text = resp.text().await.unwrap_or_default();
        match classify_edit_failure(&error_text) {
            EditFailure::AlreadyApplied => {
                debug!("telegram edit was a no-op: {error_text}");
                Ok(())
            }
            EditFailure::RetryPlain => {
                warn!("formatted edit rejected, resending as plain text: {error_text}");
                let plain_body = edit_body(edit, None)?;
                let plain_resp = self
                    .client
                    .post(&url)
                    .json(&plain_body)
                    .send()
                    .await
                    .map_err(|e| {
                        OrthoError::Channel(format!("telegram edit (plain) failed: {e}"))
                    })?;
                if !plain_resp.status().is_success() {
                    let plain_err = plain_resp.text().await.unwrap_or_default();
                    return Err(OrthoError::Channel(format!(
                        "telegram edit (plain fallback) failed: {plain_err}"
                    )));
                }
                Ok(())
            }
            EditFailure::Fatal => Err(OrthoError::Channel(format!(
                "telegram edit failed ({status}): {error_text}"
            ))),
        }
    }

    /// Look up the bot account. Used to verify the token.
    pub async fn get_me(&self) -> Result<BotInfo, OrthoError> {
        let url = format!("{}/getMe", self.base_url);
        let resp: TgResponse<BotInfo> = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| OrthoError::Channel(format!("telegram getMe failed: {e}")))?
            .json()
            .await
            .map_err(|e| OrthoError::Channel(format!("telegram getMe parse failed: {e}")))?;

        if !resp.ok {
            return Err(OrthoError::Channel(format!(
                "telegram getMe rejected: {}",
                resp.description.unwrap_or_default()
            )));
        }
        resp.result
            .ok_or_else(|| OrthoError::Channel("telegram getMe returned no result".into()))
    }
}
