use thiserror::Error;

pub type Result<T> = std::result::Result<T, PredictError>;

/// Which stage of a request produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Encoding,
    Credential,
    Transport,
    Decoding,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Encoding => "encoding",
            Phase::Credential => "credential",
            Phase::Transport => "transport",
            Phase::Decoding => "decoding",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum PredictError {
    /// The request row itself is malformed. Caller bug, never retried.
    #[error("invalid request row: {0}")]
    Encoding(String),

    /// Client TLS identity is missing or unreadable. Raised before any
    /// connection attempt is made.
    #[error("client credentials: {0}")]
    Credential(String),

    /// DNS, socket or TLS failure, including an expired request timeout.
    #[error("connection failed: {message}")]
    Connection { message: String, timeout: bool },

    /// The service answered with a non-success status code.
    #[error("service returned HTTP {status}")]
    Http { status: u16 },

    /// The response body did not parse as a prediction message. The byte
    /// length is kept so a protocol mismatch can be diagnosed without
    /// logging response contents.
    #[error("unable to decode {length} byte response: {message}")]
    Decode { message: String, length: usize },
}

impl PredictError {
    pub fn encoding(msg: impl Into<String>) -> Self {
        PredictError::Encoding(msg.into())
    }

    pub fn credential(msg: impl Into<String>) -> Self {
        PredictError::Credential(msg.into())
    }

    pub fn phase(&self) -> Phase {
        match self {
            PredictError::Encoding(_) => Phase::Encoding,
            PredictError::Credential(_) => Phase::Credential,
            PredictError::Connection { .. } | PredictError::Http { .. } => Phase::Transport,
            PredictError::Decode { .. } => Phase::Decoding,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, PredictError::Connection { timeout: true, .. })
    }

    /// Whether the caller may reasonably resend the same row. Connection
    /// failures and throttling/unavailable statuses qualify; everything
    /// else would fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            PredictError::Connection { .. } => true,
            PredictError::Http { status } => matches!(*status, 429 | 503 | 504),
            _ => false,
        }
    }
}
