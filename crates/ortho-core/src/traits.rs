use crate::{
    error::OrthoError,
    message::{IncomingMessage, MessageEdit, ProposedEdit},
};
use async_trait::async_trait;

/// Grammar engine trait — the proofreader.
///
/// Implementations are fixed to one language at construction time and must
/// return edits whose spans lie on char boundaries of the checked text.
#[async_trait]
pub trait GrammarEngine: Send + Sync {
    /// Human-readable engine name.
    fn name(&self) -> &str;

    /// Language variant the engine checks against (e.g. "ru-RU").
    fn language(&self) -> &str;

    /// Check `text` and return proposed edits in engine order.
    async fn check(&self, text: &str) -> Result<Vec<ProposedEdit>, OrthoError>;

    /// Check if the engine is reachable and ready.
    async fn is_available(&self) -> bool;
}

/// Messaging Channel trait — the nervous system.
///
/// A channel delivers the account owner's messages and can rewrite them in
/// place. It never posts new messages.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming messages.
    /// Returns a receiver that yields incoming messages.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<IncomingMessage>, OrthoError>;

    /// Replace the content of an existing message.
    async fn edit(&self, edit: MessageEdit) -> Result<(), OrthoError>;

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), OrthoError>;
}
