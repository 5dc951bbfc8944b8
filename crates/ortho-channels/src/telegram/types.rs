//! Telegram Bot API deserialization types.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TgResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgUpdate {
    pub update_id: i64,
    pub business_connection: Option<TgBusinessConnection>,
    pub business_message: Option<TgMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgBusinessConnection {
    pub id: String,
    pub user: TgUser,
    #[serde(default)]
    pub is_enabled: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgMessage {
    pub message_id: i64,
    pub from: Option<TgUser>,
    pub chat: TgChat,
    pub text: Option<String>,
    #[serde(default)]
    pub entities: Vec<TgEntity>,
    pub business_connection_id: Option<String>,
}

/// A formatting span. `offset` and `length` are UTF-16 code units.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TgEntity {
    #[serde(rename = "type")]
    pub kind: String,
    pub offset: usize,
    pub length: usize,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub(crate) struct TgUser {
    pub id: i64,
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgChat {
    pub id: i64,
}
