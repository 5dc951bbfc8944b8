//! Long-polling update loop and Channel trait implementation.

use super::markdown::render_markdown;
use super::types::{TgMessage, TgResponse, TgUpdate};
use super::TelegramChannel;
use async_trait::async_trait;
use ortho_core::{
    error::OrthoError,
    message::{IncomingMessage, MessageEdit, MessageRef},
    traits::Channel,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Update kinds requested from `getUpdates`. Edited messages are left out so
/// the relay's own edits never come back as input.
pub(crate) const ALLOWED_UPDATES: &str = r#"["business_connection","business_message"]"#;

/// Turn a business message into an incoming message, or `None` when it
/// carries no text or no author.
pub(crate) fn to_incoming(msg: TgMessage) -> Option<IncomingMessage> {
    let text = msg.text?;
    let user = msg.from?;
    let text = render_markdown(&text, &msg.entities);

    Some(IncomingMessage {
        id: Uuid::new_v4(),
        channel: "telegram".to_string(),
        sender_id: user.id.to_string(),
        text,
        target: MessageRef {
            chat_id: msg.chat.id.to_string(),
            message_id: msg.message_id.to_string(),
            connection_id: msg.business_connection_id,
        },
    })
}

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingMessage>, OrthoError> {
        let (tx, rx) = mpsc::channel(64);
        let client = self.client.clone();
        let base_url = self.base_url.clone();
        let last_update_id = self.last_update_id.clone();

        info!("Telegram channel starting long polling...");

        tokio::spawn(async move {
            let mut backoff_secs: u64 = 1;

            loop {
                let last = last_update_id.lock().await;
                let offset = last.map(|id| id + 1);
                drop(last);

                let mut query = vec![
                    ("timeout", "30".to_string()),
                    ("allowed_updates", ALLOWED_UPDATES.to_string()),
                ];
                if let Some(off) = offset {
                    query.push(("offset", off.to_string()));
                }

                let resp = match client
                    .get(format!("{base_url}/getUpdates"))
                    .query(&query)
                    .timeout(Duration::from_secs(35))
                    .send()
                    .await
                {
                    Ok(r) => r,
                    Err(e) => {
                        error!("telegram poll error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(60);
                        continue;
                    }
                };

                let body: TgResponse<Vec<TgUpdate>> = match resp.json().await {
                    Ok(b) => b,
                    Err(e) => {
                        error!("telegram parse error (retry in {backoff_secs}s): {e}");
                        tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                        backoff_secs = (backoff_secs * 2).min(60);
                        continue;
                    }
                };

                if !body.ok {
                    error!(
                        "telegram API error (retry in {backoff_secs}s): {}",
                        body.description.unwrap_or_default()
                    );
                    tokio::time::sleep(Duration::from_secs(backoff_secs)).await;
                    backoff_secs = (backoff_secs * 2).min(60);
                    continue;
                }

                // Successful poll -- reset backoff.
                backoff_secs = 1;

                let updates = body.result.unwrap_or_default();

                if let Some(last_update) = updates.last() {
                    *last_update_id.lock().await = Some(last_update.update_id);
                }

                for update in updates {
                    if let Some(conn) = update.business_connection {
                        info!(
                            "telegram business connection {} for user {}: {}",
                            conn.id,
                            conn.user.id,
                            if conn.is_enabled { "enabled" } else { "disabled" }
                        );
                        continue;
                    }

                    let Some(msg) = update.business_message else {
                        continue;
                    };

                    let Some(incoming) = to_incoming(msg) else {
                        debug!("telegram: skipping non-text business message");
                        continue;
                    };

                    if tx.send(incoming).await.is_err() {
                        info!("telegram channel receiver dropped, stopping poll");
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn edit(&self, edit: MessageEdit) -> Result<(), OrthoError> {
        self.edit_text(&edit).await
    }

    async fn stop(&self) -> Result<(), OrthoError> {
        info!("Telegram channel stopped");
        Ok(())
    }
}
