//! Gateway: the event loop connecting the channel, the activation switch,
//! and the grammar engine.

pub mod pipeline;


use crate::commands::{self, Route};
use ortho_core::{
    activation::Activation,
    error::OrthoError,
    message::{IncomingMessage, MessageEdit, TextFormat},
    traits::{Channel, GrammarEngine},
};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

/// What the gateway did with one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    Activated,
    Deactivated,
    StatusReported,
    /// The message was rewritten with a correction.
    Corrected,
    /// The engine found nothing to change.
    Unchanged,
    /// Corrections are paused; the engine was not consulted.
    Inactive,
    Ignored,
}

/// Routes the owner's messages to commands or the correction pipeline.
pub struct Gateway {
    engine: Arc<dyn GrammarEngine>,
    channel: Arc<dyn Channel>,
    activation: Activation,
    /// Platform ID of the account the relay acts for.
    self_id: String,
    prefix: String,
}

impl Gateway {
    /// Create a new gateway. Corrections start active.
    pub fn new(
        engine: Arc<dyn GrammarEngine>,
        channel: Arc<dyn Channel>,
        self_id: String,
        prefix: String,
    ) -> Self {
        Self {
            engine,
            channel,
            activation: Activation::new(),
            self_id,
            prefix,
        }
    }

    /// Run the main event loop until the channel closes or Ctrl-C.
    ///
    /// Checks already in flight run to completion before the channel stops.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        info!(
            "Ortho gateway running | engine: {} ({}) | channel: {} | prefix: {}",
            self.engine.name(),
            self.engine.language(),
            self.channel.name(),
            self.prefix,
        );

        let name = self.channel.name().to_string();
        let mut rx = self
            .channel
            .start()
            .await
            .map_err(|e| anyhow::anyhow!("failed to start channel {name}: {e}"))?;
        info!("Channel started: {name}");

        // Each message gets its own task so a slow check never stalls the loop.
        let mut in_flight = JoinSet::new();
        loop {
            tokio::select! {
                incoming = rx.recv() => {
                    let Some(incoming) = incoming else {
                        info!("channel closed");
                        break;
                    };
                    let gw = self.clone();
                    in_flight.spawn(async move {
                        let id = incoming.id;
                        match gw.handle(incoming).await {
                            Ok(outcome) => debug!("message {id}: {outcome:?}"),
                            Err(e) => error!("failed to handle message {id}: {e}"),
                        }
                    });
                }
                // Reap finished handlers so the set does not grow unbounded.
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        error!("message handler panicked: {e}");
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        self.shutdown(in_flight).await;
        Ok(())
    }

    /// Classify one message and run the matching behavior.
    ///
    /// Engine and edit failures are returned, not swallowed; the message is
    /// left as it was.
    pub async fn handle(&self, incoming: IncomingMessage) -> Result<Handled, OrthoError> {
        match Route::classify(&incoming, &self.self_id, &self.prefix) {
            Route::Ignore => Ok(Handled::Ignored),
            Route::Activate => {
                self.activation.activate();
                info!("corrections activated");
                self.edit(&incoming, commands::ACTIVE_REPLY.to_string(), TextFormat::Html)
                    .await?;
                Ok(Handled::Activated)
            }
            Route::Deactivate => {
                self.activation.deactivate();
                info!("corrections deactivated");
                self.edit(
                    &incoming,
                    commands::inactive_reply(&self.prefix),
                    TextFormat::Html,
                )
                .await?;
                Ok(Handled::Deactivated)
            }
            Route::Status => {
                let text = if self.activation.is_active() {
                    commands::STATUS_ACTIVE
                } else {
                    commands::STATUS_INACTIVE
                };
                info!("status requested: {text}");
                self.edit(&incoming, text.to_string(), TextFormat::Html)
                    .await?;
                Ok(Handled::StatusReported)
            }
            Route::Correct => self.correct(&incoming).await,
        }
    }

    async fn correct(&self, incoming: &IncomingMessage) -> Result<Handled, OrthoError> {
        if !self.activation.is_active() {
            debug!("message received while inactive, ignoring");
            return Ok(Handled::Inactive);
        }

        info!("[{}] checking message {}", incoming.channel, incoming.target.message_id);
        debug!("checking text: {}", incoming.text);

        let correction = pipeline::correct(self.engine.as_ref(), &incoming.text).await?;
        if !correction.changed() {
            debug!("no mistakes found");
            return Ok(Handled::Unchanged);
        }

        debug!("corrected: {}", correction.corrected);
        self.edit(incoming, correction.corrected, TextFormat::Markdown)
            .await?;
        info!("[{}] corrected message {}", incoming.channel, incoming.target.message_id);
        Ok(Handled::Corrected)
    }

    /// Rewrite the triggering message in place.
    async fn edit(
        &self,
        incoming: &IncomingMessage,
        text: String,
        format: TextFormat,
    ) -> Result<(), OrthoError> {
        self.channel
            .edit(MessageEdit {
                target: incoming.target.clone(),
                text,
                format,
            })
            .await
    }

    async fn shutdown(&self, mut in_flight: JoinSet<()>) {
        info!("Shutting down...");
        if !in_flight.is_empty() {
            info!("waiting for {} in-flight message(s)", in_flight.len());
        }
        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                error!("message handler panicked: {e}");
            }
        }
        if let Err(e) = self.channel.stop().await {
            error!("failed to stop channel {}: {e}", self.channel.name());
        }
        info!("Shutdown complete.");
    }
}
