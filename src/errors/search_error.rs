use thiserror::Error;

/// Failures of the search pipeline. Every variant is reported to the caller as a
/// tool-level error; none of them abort the server.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("{0}")]
    Validation(String),

    #[error("{message}: {cause}")]
    Credential { message: String, cause: String },

    #[error("marshal request: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("{stage}: {cause}")]
    Transport {
        stage: &'static str,
        status: u16,
        cause: String,
    },

    #[error("Vertex search HTTP {status}: {body}")]
    BackendStatus { status: u16, body: String },
}

impl SearchError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn credential(message: impl Into<String>, cause: impl ToString) -> Self {
        Self::Credential {
            message: message.into(),
            cause: cause.to_string(),
        }
    }

    pub fn transport(stage: &'static str, status: u16, cause: impl ToString) -> Self {
        Self::Transport {
            stage,
            status,
            cause: cause.to_string(),
        }
    }

    /// Status observed before the failure; `0` when no response arrived.
    pub fn status(&self) -> u16 {
        match self {
            Self::Transport { status, .. } | Self::BackendStatus { status, .. } => *status,
            _ => 0,
        }
    }
}
