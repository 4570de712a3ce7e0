//! Runtime error types.

use std::net::SocketAddr;

use thiserror::Error;

/// Errors surfaced while bringing up or running a node.
///
/// Per-request failures never appear here: the protocol reports those to the
/// client as `Error:` response lines and the connection stays healthy.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A listening socket could not be bound.
    #[error("failed to bind {addr}: {source}")]
    BindFailed {
        /// The address that could not be bound.
        addr: SocketAddr,
        /// The underlying socket error.
        source: std::io::Error,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] tarmac_core::Error),

    /// Any other I/O failure during startup.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for runtime results.
pub type ServerResult<T> = Result<T, ServerError>;
