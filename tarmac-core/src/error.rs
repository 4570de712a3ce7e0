//! Error types for Tarmac core operations.
//!
//! Protocol-level failures (bad request fields, unknown airports) are not
//! Rust errors - they are response lines, rendered in `tarmac-wire`. This
//! enum covers programmatic misuse of the core APIs.

use std::fmt;

/// The result type for Tarmac core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Tarmac core operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An invalid argument was provided.
    InvalidArgument {
        /// The name of the argument.
        name: &'static str,
        /// Why it was invalid.
        reason: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { name, reason } => {
                write!(f, "invalid argument '{name}': {reason}")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidArgument {
            name: "queue_capacity",
            reason: "must be positive",
        };
        assert_eq!(
            format!("{err}"),
            "invalid argument 'queue_capacity': must be positive"
        );
    }
}
