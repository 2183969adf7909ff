use thiserror::Error;

/// Top-level client error. All variants carry a human-readable message for
/// display/logging; only login/signup ever surface one to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    // ── Transport errors ─────────────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(String),

    // ── Auth errors ──────────────────────────────────────────────────────────
    #[error("Auth failed: {message}")]
    Auth { message: String },

    #[error("No active session")]
    NoSession,

    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },

    #[error("'{value}' is not a valid email address")]
    InvalidEmail { value: String },

    #[error("Submission blocked")]
    Blocked,

    // ── Environment errors ───────────────────────────────────────────────────
    #[error("Browser storage is unavailable")]
    StorageUnavailable,

    #[error("WebSocket unavailable: {0}")]
    SocketUnavailable(String),
}

impl ClientError {
    pub fn network(message: impl Into<String>) -> Self {
        ClientError::Network(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        ClientError::Decode(message.into())
    }

    pub fn service(status: u16, message: impl Into<String>) -> Self {
        ClientError::Service { status, message: message.into() }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        ClientError::Auth { message: message.into() }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::EmptyField { .. } | ClientError::InvalidEmail { .. } | ClientError::Blocked
        )
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Auth { .. } | ClientError::NoSession)
    }
}
