//! The discrete scheduling-horizon slot model.
//!
//! One operational day is divided into `HORIZON_SLOTS` discrete slots of
//! `SLOT_MINUTES` minutes each. Slot indices convert deterministically to a
//! wall-clock hour/minute pair for display; the conversion is pure and
//! stateless.

use std::fmt;

/// Number of discrete scheduling slots covering one operational day.
pub const HORIZON_SLOTS: u32 = 96;

/// Length of one scheduling slot in minutes.
pub const SLOT_MINUTES: u32 = 15;

/// Slots per hour, derived from the slot length.
const SLOTS_PER_HOUR: u32 = 60 / SLOT_MINUTES;

/// A slot index rendered as a wall-clock time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotClock {
    /// Hour of day, `0..24`.
    pub hour: u32,
    /// Minute within the hour, always a multiple of `SLOT_MINUTES`.
    pub minute: u32,
}

impl SlotClock {
    /// Converts a slot index to its hour/minute pair.
    ///
    /// The index is taken modulo the horizon so that the inclusive end slot
    /// of a reservation ending exactly at the horizon still renders.
    #[must_use]
    pub const fn from_slot(slot: u32) -> Self {
        let slot = slot % HORIZON_SLOTS;
        Self {
            hour: slot / SLOTS_PER_HOUR,
            minute: (slot % SLOTS_PER_HOUR) * SLOT_MINUTES,
        }
    }
}

impl fmt::Display for SlotClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
