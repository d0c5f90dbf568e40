//! Error types shared by the API client, resolver and command handlers.

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FmError>;

/// The kind of entity a name lookup was searching for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Application,
    Flag,
    Environment,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Application => "application",
            Self::Flag => "flag",
            Self::Environment => "environment",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum FmError {
    /// Bad or missing input, detected before any network call.
    #[error("{0}")]
    Validation(String),

    #[error("failed to parse config YAML: {0}")]
    InvalidConfig(#[from] serde_yaml::Error),

    #[error("{kind} '{name}' not found")]
    NotFound {
        kind: EntityKind,
        name: String,
        #[source]
        cause: Option<Box<FmError>>,
    },

    /// Non-2xx response. `body` is the raw response text.
    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("request to {path} failed")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode response from {path}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {what} as JSON")]
    Encode {
        what: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FmError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        Self::NotFound { kind, name: name.into(), cause: None }
    }

    /// HTTP status carried by this error, if it came from an API response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::NotFound { cause: Some(cause), .. } => cause.status(),
            _ => None,
        }
    }
}
