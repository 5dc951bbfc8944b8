use std::ops::Range;
use uuid::Uuid;

/// An incoming message from a channel.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub id: Uuid,
    /// Channel name (e.g. "telegram").
    pub channel: String,
    /// Platform-specific user ID of the author.
    pub sender_id: String,
    /// Message text in Markdown source form.
    pub text: String,
    /// Where the message lives on the platform. Edits are addressed here.
    pub target: MessageRef,
}

/// Platform-specific address of a single message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    /// Chat the message was posted in.
    pub chat_id: String,
    pub message_id: String,
    /// Telegram business connection the message arrived through, if any.
    pub connection_id: Option<String>,
}

/// How the platform should render edited text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Html,
    Markdown,
}

/// A request to replace the content of an existing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEdit {
    pub target: MessageRef,
    pub text: String,
    pub format: TextFormat,
}

/// A single replacement proposed by a grammar engine.
///
/// `span` is a byte range into the checked text and always falls on char
/// boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedEdit {
    pub span: Range<usize>,
    pub replacement: String,
    /// Engine rule that produced the edit, when the engine reports one.
    pub rule_id: Option<String>,
}

impl ProposedEdit {
    pub fn new(span: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
            rule_id: None,
        }
    }
}
