//! Error types for fieldhook

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown command: /{input}")]
    UnknownCommand {
        input: String,
        suggestions: Vec<String>,
    },

    #[error("missing required arguments for /{command}: {}", missing.join(", "))]
    MissingArgs {
        command: String,
        missing: Vec<String>,
        help: String,
    },

    #[error("invalid argument {name}: {reason}")]
    InvalidArg { name: String, reason: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("unknown artifact: {0}")]
    UnknownArtifact(String),

    #[error("handler error: {event} - {message}")]
    Handler { event: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn handler(event: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Handler {
            event: event.into(),
            message: message.into(),
        }
    }

    pub fn invalid_arg(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArg {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
