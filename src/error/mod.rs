//! Error types for the bot.
//!
//! `AppError` is the top-level error type returned from startup and from every call
//! into the Discord API. Expected user-facing conditions (missing permission, member
//! not found, out-of-range input) are not errors; they become ephemeral replies inside
//! the command handlers. Anything that reaches the interaction dispatcher as an
//! `AppError` is logged and answered with a generic ephemeral failure message.

pub mod config;

use thiserror::Error;

use crate::error::config::ConfigError;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size. Covers gateway login failures as well as rejected
    /// REST calls such as kicks blocked by the role hierarchy.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// I/O error, raised when the health server cannot bind or serve.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// A required slash command option was absent from the interaction payload.
    ///
    /// Discord enforces required options client-side, so this only occurs when the
    /// registered command schema and the handler disagree.
    #[error("Missing required command option: {0}")]
    MissingOption(&'static str),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
