use thiserror::Error;

/// Top-level error type for Ortho.
#[derive(Debug, Error)]
pub enum OrthoError {
    /// The grammar engine could not process the text.
    #[error("engine error: {0}")]
    Engine(String),

    /// Error from a messaging channel (including failed edits).
    #[error("channel error: {0}")]
    Channel(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}
