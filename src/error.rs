use std::io;

/// Failure of a single upstream call. Never fatal on its own: the caller
/// decides whether to fall back to a default or abort.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("invalid JSON body: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} is not set")]
    MissingCredential(&'static str),

    #[error("Steam returned no player record for id {0}")]
    PlayerNotFound(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to write badge: {0}")]
    Io(#[from] io::Error),
}
