//! Tarmac Schedule - the gate/time-slot scheduling engine.
//!
//! This crate decides, under concurrent access, where and when a plane may
//! land. It has two layers:
//!
//! - [`GateSchedule`]: the per-gate occupancy state over the fixed horizon
//!   and the search/assign algorithms. Owns no lock and no I/O.
//! - [`Airport`]: the full gate array with one mutex per gate, composing the
//!   gate scheduler across gates with a strict ascending-index first-fit
//!   policy.
//!
//! # Locking discipline
//!
//! All reads and mutations of a gate's slots happen while holding that
//! gate's lock; no operation ever holds two gate locks at once, so requests
//! for different gates proceed fully in parallel and no lock ordering hazard
//! exists. Every critical section is short and synchronous - nothing in this
//! crate suspends, so it is safe to call from async workers.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod airport;
mod gate;

pub use airport::{Airport, Reservation, SlotStatus};
pub use gate::{GateSchedule, Run, TimeSlot};
