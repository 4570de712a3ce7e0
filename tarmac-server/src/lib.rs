//! Tarmac Server - the network runtime.
//!
//! Two node kinds share one accept-loop shape: a bounded work queue fed by
//! the listener, drained by a fixed pool of worker tasks. The airport node
//! answers requests against its own gate store; the controller owns no
//! schedule state at all and relays each request to the airport node named
//! inside it.
//!
//! Modules:
//! - [`work_queue`]: the bounded queue between accept loop and workers.
//! - [`net`]: line-oriented stream I/O and listener setup.
//! - [`handler`]: the airport node's pure request dispatch.
//! - [`airport`]: the airport node runtime.
//! - [`controller`]: the routing front door.
//! - [`topology`]: bootstraps a whole network inside one process.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod airport;
pub mod controller;
mod error;
pub mod handler;
pub mod net;
pub mod topology;
pub mod work_queue;

pub use error::{ServerError, ServerResult};
