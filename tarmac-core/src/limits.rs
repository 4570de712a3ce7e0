//! System limits and configuration bounds.
//!
//! Following TigerStyle: put limits on everything. Every queue, buffer, and
//! pool has an explicit maximum size, which makes backpressure and resource
//! exhaustion predictable.

/// System-wide limits for a Tarmac node.
///
/// Both node kinds (airport and controller) carry their own copy; defaults
/// match the original deployment shape of the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Number of worker tasks pulling connections from the work queue.
    pub worker_pool_size: u32,
    /// Capacity of the pending-connection work queue. A burst of accepted
    /// connections beyond this stalls the accept loop rather than spawning
    /// unbounded work.
    pub queue_capacity: u32,
    /// Maximum length of a single request line in bytes.
    pub max_line_bytes: u32,
    /// Timeout for the controller's upstream connect, in milliseconds.
    pub connect_timeout_ms: u64,
    /// Listen backlog for each node's listening socket.
    pub accept_backlog: u32,
}

impl Limits {
    /// Creates limits with safe defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            worker_pool_size: 4,
            queue_capacity: 100,
            max_line_bytes: 1024,
            connect_timeout_ms: 5000,
            accept_backlog: 128,
        }
    }

    /// Small limits for tests that exercise backpressure deliberately.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            worker_pool_size: 2,
            queue_capacity: 4,
            max_line_bytes: 256,
            connect_timeout_ms: 1000,
            accept_backlog: 16,
        }
    }

    /// Validates that all limits are internally consistent.
    ///
    /// # Errors
    /// Returns an error if any limit is zero or otherwise unusable.
    pub const fn validate(&self) -> crate::Result<()> {
        if self.worker_pool_size == 0 {
            return Err(crate::Error::InvalidArgument {
                name: "worker_pool_size",
                reason: "must be positive",
            });
        }
        if self.queue_capacity == 0 {
            return Err(crate::Error::InvalidArgument {
                name: "queue_capacity",
                reason: "must be positive",
            });
        }
        if self.max_line_bytes == 0 {
            return Err(crate::Error::InvalidArgument {
                name: "max_line_bytes",
                reason: "must be positive",
            });
        }
        if self.connect_timeout_ms == 0 {
            return Err(crate::Error::InvalidArgument {
                name: "connect_timeout_ms",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new()
    }
}
