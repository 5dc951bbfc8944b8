use super::*;
use ortho_core::message::MessageRef;
use uuid::Uuid;

const OWNER: &str = "42";

fn msg(sender: &str, text: &str) -> IncomingMessage {
    IncomingMessage {
        id: Uuid::new_v4(),
        channel: "telegram".to_string(),
        sender_id: sender.to_string(),
        text: text.to_string(),
        target: MessageRef {
            chat_id: "100".into(),
            message_id: "1".into(),
            connection_id: None,
        },
    }
}

fn route(sender: &str, text: &str) -> Route {
    Route::classify(&msg(sender, text), OWNER, "!")
}

#[test]
fn test_classify_commands() {
    assert_eq!(route(OWNER, "!start"), Route::Activate);
    assert_eq!(route(OWNER, "!stop"), Route::Deactivate);
    assert_eq!(route(OWNER, "!status"), Route::Status);
}

#[test]
fn test_classify_plain_text() {
    assert_eq!(route(OWNER, "Ths is a tst"), Route::Correct);
    assert_eq!(route(OWNER, "start"), Route::Correct);
}

#[test]
fn test_commands_are_exact_and_case_sensitive() {
    assert_eq!(route(OWNER, "!Start"), Route::Correct);
    assert_eq!(route(OWNER, "!START"), Route::Correct);
    assert_eq!(route(OWNER, "!start now"), Route::Correct);
    assert_eq!(route(OWNER, " !stop"), Route::Correct);
    assert_eq!(route(OWNER, "!statuses"), Route::Correct);
    assert_eq!(route(OWNER, "!"), Route::Correct);
}

#[test]
fn test_other_senders_are_ignored() {
    for text in ["!start", "!stop", "!status", "Ths is a tst", ""] {
        assert_eq!(route("7", text), Route::Ignore, "text {text:?}");
    }
}

#[test]
fn test_empty_text_is_ignored() {
    assert_eq!(route(OWNER, ""), Route::Ignore);
    assert_eq!(route(OWNER, "  \n "), Route::Ignore);
}

#[test]
fn test_custom_prefix() {
    let m = msg(OWNER, ".start");
    assert_eq!(Route::classify(&m, OWNER, "."), Route::Activate);
    assert_eq!(Route::classify(&m, OWNER, "!"), Route::Correct);
    let m = msg(OWNER, "!start");
    assert_eq!(Route::classify(&m, OWNER, "."), Route::Correct);
}

#[test]
fn test_inactive_reply_names_prefix() {
    assert!(inactive_reply("!").contains("<code>!start</code>"));
    assert!(inactive_reply("<").contains("<code>&lt;start</code>"));
}

#[test]
fn test_replies_are_distinct() {
    assert_ne!(STATUS_ACTIVE, STATUS_INACTIVE);
    assert!(ACTIVE_REPLY.contains("active"));
    assert!(inactive_reply("!").contains("inactive"));
}
