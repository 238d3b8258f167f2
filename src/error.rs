use thiserror::Error;

/// Exit status for usage errors, matching what clap uses for bad flags.
pub const USAGE_EXIT_CODE: u8 = 2;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No ClickUp API token found: set CLICKUP_API_TOKEN or add it to {0}")]
    MissingCredential(String),
    #[error("Invalid API token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),
    #[error("Usage error: {0}")]
    Usage(String),
    #[error("HTTP {status} {reason}\n{detail}")]
    Http {
        status: u16,
        reason: String,
        detail: String,
    },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Serde Json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn usage(msg: impl Into<String>) -> Self {
        Error::Usage(msg.into())
    }

    /// Process exit status for this failure. Every failure is fatal.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Usage(_) => USAGE_EXIT_CODE,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
