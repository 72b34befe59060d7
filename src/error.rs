use reqwest::StatusCode;

/// Failures talking to the ledger API.
///
/// A non-2xx response with a readable body is a normal error value
/// (`Http`), not a transport failure; connection-level problems propagate
/// unmodified as `Transport`.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("API credentials are missing or malformed")]
    Auth,

    #[error("ledger API returned {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("transport failure talking to the ledger API")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode ledger API response")]
    Decode(#[from] serde_json::Error),
}
