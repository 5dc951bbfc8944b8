//! Tests for the Telegram channel module.

use super::markdown::render_markdown;
use super::polling::{to_incoming, ALLOWED_UPDATES};
use super::send::{classify_edit_failure, edit_body, EditFailure};
use super::types::*;
use ortho_core::message::{MessageEdit, MessageRef, TextFormat};

fn entity(kind: &str, offset: usize, length: usize) -> TgEntity {
    TgEntity {
        kind: kind.to_string(),
        offset,
        length,
        url: None,
        language: None,
    }
}

fn edit(format: TextFormat, connection: Option<&str>) -> MessageEdit {
    MessageEdit {
        target: MessageRef {
            chat_id: "100".into(),
            message_id: "7".into(),
            connection_id: connection.map(String::from),
        },
        text: "This is a test".into(),
        format,
    }
}

#[test]
fn test_business_message_update() {
    let json = r#"{
        "update_id": 5,
        "business_message": {
            "message_id": 7,
            "business_connection_id": "conn-1",
            "from": {"id": 42, "is_bot": false, "first_name": "Ann"},
            "chat": {"id": 100, "type": "private"},
            "date": 1700000000,
            "text": "Ths is a tst"
        }
    }"#;
    let update: TgUpdate = serde_json::from_str(json).unwrap();
    assert_eq!(update.update_id, 5);
    assert!(update.business_connection.is_none());

    let incoming = to_incoming(update.business_message.unwrap()).unwrap();
    assert_eq!(incoming.channel, "telegram");
    assert_eq!(incoming.sender_id, "42");
    assert_eq!(incoming.text, "Ths is a tst");
    assert_eq!(incoming.target.chat_id, "100");
    assert_eq!(incoming.target.message_id, "7");
    assert_eq!(incoming.target.connection_id.as_deref(), Some("conn-1"));
}

#[test]
fn test_business_connection_update() {
    let json = r#"{
        "update_id": 6,
        "business_connection": {
            "id": "conn-1",
            "user": {"id": 42, "is_bot": false, "first_name": "Ann", "username": "ann"},
            "user_chat_id": 42,
            "date": 1700000000,
            "is_enabled": true
        }
    }"#;
    let update: TgUpdate = serde_json::from_str(json).unwrap();
    let conn = update.business_connection.unwrap();
    assert_eq!(conn.id, "conn-1");
    assert_eq!(conn.user.id, 42);
    assert!(conn.is_enabled);
    assert!(update.business_message.is_none());
}

#[test]
fn test_media_message_is_skipped() {
    let json = r#"{
        "message_id": 8,
        "from": {"id": 42, "first_name": "Ann"},
        "chat": {"id": 100},
        "photo": [{"file_id": "x", "width": 10, "height": 10}]
    }"#;
    let msg: TgMessage = serde_json::from_str(json).unwrap();
    assert!(to_incoming(msg).is_none());
}

#[test]
fn test_message_without_author_is_skipped() {
    let json = r#"{"message_id": 9, "chat": {"id": 100}, "text": "hi"}"#;
    let msg: TgMessage = serde_json::from_str(json).unwrap();
    assert!(to_incoming(msg).is_none());
}

#[test]
fn test_allowed_updates_exclude_edits() {
    let kinds: Vec<String> = serde_json::from_str(ALLOWED_UPDATES).unwrap();
    assert_eq!(kinds, vec!["business_connection", "business_message"]);
}

#[test]
fn test_render_plain_text_unchanged() {
    assert_eq!(render_markdown("Ths is a tst", &[]), "Ths is a tst");
}

#[test]
fn test_render_escapes_markdown_chars() {
    assert_eq!(render_markdown("snake_case *x*", &[]), "snake\\_case \\*x\\*");
}

#[test]
fn test_render_bold_and_italic() {
    let text = "very important note";
    let rendered = render_markdown(text, &[entity("bold", 0, 4), entity("italic", 5, 9)]);
    assert_eq!(rendered, "*very* _important_ note");
}

#[test]
fn test_render_link_and_code() {
    let mut link = entity("text_link", 4, 4);
    link.url = Some("https://example.com".into());
    let rendered = render_markdown("see docs and run ls", &[link, entity("code", 17, 2)]);
    assert_eq!(rendered, "see [docs](https://example.com) and run `ls`");
}

#[test]
fn test_render_pre_with_language() {
    let mut pre = entity("pre", 0, 9);
    pre.language = Some("rust".into());
    assert_eq!(render_markdown("let x = 1", &[pre]), "```rust\nlet x = 1```");
}

#[test]
fn test_render_utf16_offsets() {
    // Emoji occupies two UTF-16 units.
    let rendered = render_markdown("😀 привет", &[entity("bold", 3, 6)]);
    assert_eq!(rendered, "😀 *привет*");
}

#[test]
fn test_render_skips_nested_and_unknown_entities() {
    let text = "bold words here";
    let rendered = render_markdown(
        text,
        &[
            entity("bold", 0, 10),
            entity("italic", 5, 5),
            entity("mention", 11, 4),
        ],
    );
    assert_eq!(rendered, "*bold words* here");
}

#[test]
fn test_render_ignores_out_of_range_entity() {
    assert_eq!(render_markdown("short", &[entity("bold", 3, 10)]), "short");
}

#[test]
fn test_edit_body_business_markdown() {
    let body = edit_body(&edit(TextFormat::Markdown, Some("conn-1")), Some(TextFormat::Markdown))
        .unwrap();
    assert_eq!(body["chat_id"], 100);
    assert_eq!(body["message_id"], 7);
    assert_eq!(body["text"], "This is a test");
    assert_eq!(body["parse_mode"], "Markdown");
    assert_eq!(body["business_connection_id"], "conn-1");
}

#[test]
fn test_edit_body_plain_without_connection() {
    let body = edit_body(&edit(TextFormat::Html, None), None).unwrap();
    assert!(body.get("parse_mode").is_none());
    assert!(body.get("business_connection_id").is_none());
}

#[test]
fn test_edit_body_html() {
    let body = edit_body(&edit(TextFormat::Html, None), Some(TextFormat::Html)).unwrap();
    assert_eq!(body["parse_mode"], "HTML");
}

#[test]
fn test_edit_body_rejects_bad_ids() {
    let mut bad = edit(TextFormat::Html, None);
    bad.target.chat_id = "not-a-number".into();
    assert!(edit_body(&bad, None).is_err());
}

#[test]
fn test_classify_edit_failures() {
    assert_eq!(
        classify_edit_failure(
            r#"{"ok":false,"error_code":400,"description":"Bad Request: can't parse entities: Can't find end of the entity"}"#
        ),
        EditFailure::RetryPlain
    );
    assert_eq!(
        classify_edit_failure(
            r#"{"ok":false,"error_code":400,"description":"Bad Request: message is not modified"}"#
        ),
        EditFailure::AlreadyApplied
    );
    assert_eq!(
        classify_edit_failure(
            r#"{"ok":false,"error_code":400,"description":"Bad Request: message can't be edited"}"#
        ),
        EditFailure::Fatal
    );
}

#[test]
fn test_get_me_response() {
    let json = r#"{"ok": true, "result": {"id": 1, "is_bot": true, "first_name": "Ortho", "username": "ortho_bot"}}"#;
    let resp: TgResponse<super::BotInfo> = serde_json::from_str(json).unwrap();
    assert!(resp.ok);
    assert_eq!(resp.result.unwrap().username.as_deref(), Some("ortho_bot"));
}
