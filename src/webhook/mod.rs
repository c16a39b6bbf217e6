pub mod log;
pub mod routes;
pub mod server;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("webhook I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode log entry: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid webhook bind address '{addr}': {source}")]
    InvalidAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("failed to bind webhook listener on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("try_bind() must be called before run()")]
    NotBound,
}
