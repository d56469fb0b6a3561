use std::path::PathBuf;

use thiserror::Error;

use crate::logging::LoggingError;

/// Unified result type for the motif strip crate.
pub type Result<T> = std::result::Result<T, EncodeError>;

/// Errors surfaced while reading, encoding, laying out or rendering a sequence.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("input file `{}` not found or unreadable", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("input contains no motif tokens")]
    EmptyInput,
    #[error("token `{0}` has no encoding in the mapping")]
    UnmappedToken(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to write image `{}`: {source}", path.display())]
    RenderIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("canvas {width}x{height} exceeds the drawable limit")]
    CanvasTooLarge { width: u64, height: u64 },
    #[error("drawing backend error: {0}")]
    Backend(String),
    #[error("font error: {0}")]
    Font(String),
    #[error("logging setup failed: {0}")]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl EncodeError {
    /// Whether the error was raised before any output could be produced.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EncodeError::FileNotFound { .. } | EncodeError::EmptyInput | EncodeError::InvalidConfig(_)
        )
    }

    /// Message followed by every underlying cause not already spelled out in it.
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            let text = err.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            cause = err.source();
        }
        message
    }
}
