use thiserror::Error;

/// Failures at the vision API boundary. Every variant ends the current invocation.
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("network error: {0}")]
    Network(String),

    #[error("vision api returned {status} {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("failed to parse vision api response: {0}")]
    Parse(String),

    #[error("invalid client configuration: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for VisionError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            VisionError::Parse(e.to_string())
        } else {
            VisionError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for VisionError {
    fn from(e: serde_json::Error) -> Self {
        VisionError::Parse(e.to_string())
    }
}
