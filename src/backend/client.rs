use std::fmt;

use async_trait::async_trait;

/// Ways a chat request can fail. The UI shows the same banner for all of
/// them; the variants exist for the log.
#[derive(Debug)]
pub enum BackendError {
    /// Connection refused, DNS failure, reset mid-body.
    Network(String),
    /// The endpoint answered with a non-success status.
    Api { status: u16, message: String },
    /// Success status but the body wasn't `{"reply": string}`.
    Parse(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Network(msg) => write!(f, "network error: {msg}"),
            BackendError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Send one user message and wait for the reply text.
    async fn send(&self, message: &str) -> Result<String, BackendError>;
}
