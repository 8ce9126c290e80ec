use thiserror::Error;

/// Failure talking to the remote versioned file store. A missing file is not
/// an error (fetch returns `Ok(None)`); everything else is fatal to the
/// enclosing operation and is never retried.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("remote request failed: {0}")]
    Request(String),

    /// Any non-success status from the remote backend, including the
    /// optimistic-concurrency rejection of a write with a stale or missing
    /// version token.
    #[error("remote returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode remote payload: {0}")]
    Decode(String),
}

/// Failure at the persistence boundary, surfaced unchanged to the caller.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed journal document. A corrupted journal is unrecoverable
    /// without manual intervention, so this propagates as fatal.
    #[error("malformed journal document: {0}")]
    Malformed(String),
}

impl PersistenceError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
