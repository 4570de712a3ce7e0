//! Tarmac Core - Strongly-typed identifiers and configuration for Tarmac.
//!
//! This crate provides the vocabulary shared by every Tarmac component: the
//! identifier newtypes, the discrete scheduling-horizon slot model, and the
//! explicit system limits. It does NOT provide networking, scheduling, or
//! protocol logic - those live in the higher crates.
//!
//! # Design Principles (TigerStyle)
//!
//! - **Strongly-typed IDs**: Prevent mixing up a `PlaneId` with an `AirportId`
//! - **Explicit limits**: Every queue and buffer has a bounded maximum
//! - **Explicit types**: Use u32/u64, not usize
//! - **No unsafe code**: Safety > Performance

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;
mod limits;
mod slot;
mod types;

pub use error::{Error, Result};
pub use limits::Limits;
pub use slot::{SlotClock, HORIZON_SLOTS, SLOT_MINUTES};
pub use types::{AirportId, PlaneId};
