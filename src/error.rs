use thiserror::Error;

/// Failures surfaced by the bot's components.
///
/// Every component logs with context and hands the error back unchanged;
/// nothing in the core retries.
#[derive(Debug, Error)]
pub enum BotError {
    /// The backing credential store could not be read or written.
    #[error("credential store unavailable: {0}")]
    StoreUnavailable(String),

    /// The OAuth callback carried a `state` that does not match the stored one.
    #[error("OAuth state does not match the stored handshake state")]
    StateMismatch,

    /// Network or HTTP failure from one of the external APIs.
    #[error("{service} request failed: {message}")]
    Upstream {
        service: &'static str,
        message: String,
    },

    /// The statistics endpoint returned no record for the game.
    #[error("no game data found for game {0}")]
    NoGameData(i64),

    /// The credential document lacks a field the operation needs.
    #[error("credential document has no {0}")]
    MissingCredential(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BotError {
    pub fn upstream(service: &'static str, message: impl std::fmt::Display) -> Self {
        BotError::Upstream {
            service,
            message: message.to_string(),
        }
    }
}

pub type BotResult<T> = std::result::Result<T, BotError>;
